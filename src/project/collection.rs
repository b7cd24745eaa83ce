use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Records keyed by file path, iterated in discovery order
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    index: HashMap<PathBuf, usize>,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a record; a record already stored under `path` is replaced in place
    pub fn insert(&mut self, path: PathBuf, item: T) {
        match self.index.get(&path) {
            Some(&i) => self.items[i] = item,
            None => {
                self.index.insert(path, self.items.len());
                self.items.push(item);
            }
        }
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut T> {
        match self.index.get(path) {
            Some(&i) => self.items.get_mut(i),
            None => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
