//! # Prefix Matching
//!
//! Helpers for "starts with" lookups over sorted string keys, used for
//! mobile-number search and item-name suggestions.
//!
//! ## Range Form
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  prefix "0171"                                                          │
//! │                                                                         │
//! │  [ "0171" , "0172" )        ← half-open range over sorted keys          │
//! │     ▲          ▲                                                        │
//! │     │          └── successor: last char bumped by one code point        │
//! │     └── every key starting with "0171" sorts in here, nothing else      │
//! │                                                                         │
//! │  "ab\u{10FFFF}" → successor "ac"   (maxed chars are dropped first)      │
//! │  ""             → no upper bound   (matches everything)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ops::Bound;

/// Half-open key range holding exactly the strings that start with a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRange {
    start: String,
    end: Option<String>,
}

impl PrefixRange {
    pub fn new(prefix: &str) -> Self {
        PrefixRange {
            start: prefix.to_string(),
            end: successor(prefix),
        }
    }

    /// Inclusive lower bound (the prefix itself).
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Exclusive upper bound, `None` when unbounded.
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    /// Bounds suitable for `BTreeMap::range` on `String`-like keys.
    pub fn bounds(&self) -> (Bound<&str>, Bound<&str>) {
        let upper = match &self.end {
            Some(end) => Bound::Excluded(end.as_str()),
            None => Bound::Unbounded,
        };
        (Bound::Included(self.start.as_str()), upper)
    }

    pub fn contains(&self, key: &str) -> bool {
        key >= self.start.as_str() && self.end.as_deref().map_or(true, |end| key < end)
    }
}

/// Smallest string greater than every string starting with `prefix`.
///
/// Trailing `char::MAX` code points cannot be bumped and are dropped before
/// bumping the one in front of them. Returns `None` when nothing is left
/// (empty prefix, or a prefix made only of `char::MAX`).
pub fn successor(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        if let Some(next) = next_char(last) {
            chars.push(next);
            return Some(chars.into_iter().collect());
        }
    }
    None
}

fn next_char(c: char) -> Option<char> {
    let mut code = c as u32 + 1;
    // skip the surrogate block
    if code == 0xD800 {
        code = 0xE000;
    }
    char::from_u32(code)
}

/// Plain predicate form of a prefix match.
#[inline]
pub fn matches_prefix(key: &str, prefix: &str) -> bool {
    key.starts_with(prefix)
}

/// Picks the single best candidate for `query`.
///
/// An exact key match wins; otherwise the shortest key that starts with the
/// query. Ties keep input order. Candidates not matching the prefix are
/// ignored.
///
/// ## Example
/// ```rust
/// use memobook_core::prefix::best_match;
///
/// let mobiles = ["017112233445", "01711223344", "01711223399"];
/// let best = best_match(&mobiles, "0171122", |m| *m);
/// assert_eq!(best, Some(&"01711223344"));
/// ```
pub fn best_match<'a, T, F>(candidates: &'a [T], query: &str, key: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    if let Some(exact) = candidates.iter().find(|c| key(*c) == query) {
        return Some(exact);
    }

    candidates
        .iter()
        .filter(|c| matches_prefix(key(*c), query))
        .fold(None, |best: Option<&T>, c| match best {
            Some(b) if key(b).len() <= key(c).len() => Some(b),
            _ => Some(c),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_successor() {
        assert_eq!(successor("0171").as_deref(), Some("0172"));
        assert_eq!(successor("019").as_deref(), Some("01:"));
        assert_eq!(successor("ab\u{10FFFF}").as_deref(), Some("ac"));
        assert_eq!(successor("\u{D7FF}").as_deref(), Some("\u{E000}"));
        assert_eq!(successor(""), None);
        assert_eq!(successor("\u{10FFFF}\u{10FFFF}"), None);
    }

    #[test]
    fn test_range_contains() {
        let range = PrefixRange::new("0171");
        assert!(range.contains("0171"));
        assert!(range.contains("01711223344"));
        assert!(!range.contains("0172"));
        assert!(!range.contains("017"));
        assert!(!range.contains("0181"));

        let all = PrefixRange::new("");
        assert!(all.contains(""));
        assert!(all.contains("anything"));
    }

    #[test]
    fn test_range_scan_over_btreemap() {
        let mut map = BTreeMap::new();
        for key in ["01611000000", "01711000000", "01711999999", "01712000000", "0171"] {
            map.insert(key.to_string(), ());
        }

        let range = PrefixRange::new("01711");
        let hits: Vec<&String> = map.range::<str, _>(range.bounds()).map(|(k, _)| k).collect();
        assert_eq!(hits, vec!["01711000000", "01711999999"]);
    }

    #[test]
    fn test_best_match_prefers_exact() {
        let keys = ["01711223344", "0171122334"];
        assert_eq!(best_match(&keys, "01711223344", |k| *k), Some(&"01711223344"));
        assert_eq!(best_match(&keys, "0171", |k| *k), Some(&"0171122334"));
    }

    #[test]
    fn test_best_match_ties_keep_order() {
        let keys = ["01711000001", "01711000002"];
        assert_eq!(best_match(&keys, "01711", |k| *k), Some(&"01711000001"));
    }

    #[test]
    fn test_best_match_none() {
        let keys: [&str; 0] = [];
        assert_eq!(best_match(&keys, "0171", |k| *k), None);
        assert_eq!(best_match(&["0181"], "0171", |k| *k), None);
    }

    proptest! {
        #[test]
        fn prop_range_agrees_with_starts_with(prefix in "\\PC{0,4}", key in "\\PC{0,6}") {
            let range = PrefixRange::new(&prefix);
            prop_assert_eq!(range.contains(&key), key.starts_with(&prefix));
        }

        #[test]
        fn prop_range_handles_max_code_points(
            head in "[a-c]{0,2}",
            tail in prop::collection::vec(prop::sample::select(vec!['\u{10FFFF}', '\u{10FFFE}', 'z']), 0..3),
            extra in "[a-z\u{10FFFF}]{0,2}",
            candidate in "[a-d\u{10FFFF}]{0,4}",
        ) {
            let prefix: String = head.chars().chain(tail.iter().copied()).collect();
            let range = PrefixRange::new(&prefix);

            let extended = format!("{}{}", prefix, extra);
            prop_assert!(range.contains(&extended));
            prop_assert_eq!(range.contains(&candidate), candidate.starts_with(&prefix));
        }
    }
}
