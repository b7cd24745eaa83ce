use serde::Serialize;
use std::collections::HashMap;

/// One entry of a frequency ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageCount {
    pub name: String,
    pub count: usize,
}

/// Frequency counter that remembers first-seen order
#[derive(Debug, Default)]
pub struct Tally {
    entries: Vec<UsageCount>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push(UsageCount {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a String>) {
        for name in names {
            self.add(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[UsageCount] {
        &self.entries
    }

    /// The `n` highest counts; equal counts keep first-seen order
    pub fn most_common(&self, n: usize) -> Vec<UsageCount> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted.truncate(n);
        sorted
    }
}
