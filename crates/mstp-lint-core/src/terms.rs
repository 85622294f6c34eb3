//! Custom term table.
//!
//! An ordered list of operator-maintained find/replace pairs. Order is
//! significant: pairs apply in table order, and duplicates are allowed
//! (each occurrence applies in turn).

use serde::{Deserialize, Serialize};

/// One literal find/replace pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPair {
    /// The literal text to look for.
    pub find: String,
    /// The text to substitute for every occurrence.
    pub replace: String,
}

impl TermPair {
    /// Build a pair from its two parts.
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

/// Ordered custom-term table owned by a rule engine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermTable {
    pairs: Vec<TermPair>,
}

impl TermTable {
    /// Build a table from an existing list of pairs.
    pub fn new(pairs: Vec<TermPair>) -> Self {
        Self { pairs }
    }

    /// Replace the entire table. Evaluations already returned are
    /// unaffected; the next evaluation sees the new table.
    pub fn set_terms(&mut self, pairs: Vec<TermPair>) {
        self.pairs = pairs;
    }

    /// Append a pair to the end of the table.
    ///
    /// A call with an empty find or replace part is a no-op, not an error.
    pub fn add_term(&mut self, find: &str, replace: &str) {
        if find.is_empty() || replace.is_empty() {
            tracing::debug!(find, replace, "ignoring empty custom term");
            return;
        }
        self.pairs.push(TermPair::new(find, replace));
    }

    /// Iterate pairs in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, TermPair> {
        self.pairs.iter()
    }

    /// Number of pairs in the table.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the table has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a TermTable {
    type Item = &'a TermPair;
    type IntoIter = std::slice::Iter<'a, TermPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_term_appends_in_order() {
        let mut table = TermTable::default();
        table.add_term("utilize", "use");
        table.add_term("in order to", "to");
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].find, "utilize");
        assert_eq!(pairs[1].find, "in order to");
    }

    #[test]
    fn empty_parts_are_no_ops() {
        let mut table = TermTable::default();
        table.add_term("", "use");
        table.add_term("utilize", "");
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_finds_are_kept() {
        let mut table = TermTable::default();
        table.add_term("foo", "bar");
        table.add_term("foo", "baz");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn set_terms_replaces_everything() {
        let mut table = TermTable::new(vec![TermPair::new("a", "b")]);
        table.set_terms(vec![TermPair::new("c", "d"), TermPair::new("e", "f")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().next().unwrap().find, "c");
    }
}
