use crate::Value;
use std::iter::FromIterator;

/// An ordered, possibly heterogeneous sequence of [`Value`](enum.Value.html)s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List {
    items: Vec<Value>,
}

impl List {
    pub fn new() -> List {
        List::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> List {
        List {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append `value` to the end of the list.
    pub fn append<V: Into<Value>>(&mut self, value: V) {
        self.items.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Value> {
        self.items.iter()
    }

    /// Number of bytes the encoder emits for this list, including its size and count headers.
    pub fn encoded_size(&self) -> usize {
        8 + self
            .items
            .iter()
            .map(|v| 1 + v.encoded_size())
            .sum::<usize>()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl<V: Into<Value>> FromIterator<V> for List {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> List {
        List {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: Into<Value>> From<Vec<V>> for List {
    fn from(items: Vec<V>) -> List {
        items.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
