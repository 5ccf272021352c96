//! Insertion-ordered frequency map.

use std::collections::HashMap;

/// Category-to-count map that remembers first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table pre-seeded with zero counts, fixing their order.
    pub fn seeded<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for category in categories {
            table.slot(category.as_ref());
        }
        table
    }

    /// Builds a table from one pass over `values`.
    pub fn tally<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        table.extend(values);
        table
    }

    pub fn add(&mut self, category: &str) {
        let slot = self.slot(category);
        self.entries[slot].1 += 1;
    }

    pub fn extend<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.add(value.as_ref());
        }
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
    }

    /// Highest count; ties go to the earliest category.
    pub fn mode(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (category, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((category, count)),
            }
        }
        best
    }

    fn slot(&mut self, category: &str) -> usize {
        if let Some(&slot) = self.index.get(category) {
            return slot;
        }
        let slot = self.entries.len();
        self.entries.push((category.to_string(), 0));
        self.index.insert(category.to_string(), slot);
        slot
    }
}
