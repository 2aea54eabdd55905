use crate::errors::*;
use crate::Value;
use indexmap::IndexMap;
use snafu::OptionExt;
use std::convert::TryFrom;
use std::iter::FromIterator;

/// An insertion-ordered map from string keys to [`Value`](enum.Value.html)s; the body of a
/// map message.
///
/// Setting a key that is already present replaces its value but keeps the key in its
/// original position.
///
/// ```rust
/// use mapmsg::{List, Map};
///
/// # fn build() -> mapmsg::Result<()> {
/// let mut nested = Map::new();
/// nested.set("name", "Smith");
/// nested.set("number", 354);
///
/// let mut colors = List::new();
/// colors.append("red");
/// colors.append("green");
/// colors.append("white");
///
/// let mut content = Map::new();
/// content.set("id", 987654321);
/// content.set("name", "Widget");
/// content.set("percent", 0.99);
/// content.set("nestedMap", nested);
/// content.set("colorsList", colors);
///
/// assert_eq!(content.get_as::<i32>("id")?, 987654321);
/// # Ok(())
/// # }
/// # build().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: IndexMap<String, Value>,
}

impl Map {
    pub fn new() -> Map {
        Map::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Map {
        Map {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert `value` under `key`, returning the value previously stored there (if any).
    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up `key`. Fails with `KeyNotFound` if it is not present.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.entries.get(key).context(KeyNotFoundSnafu { key })
    }

    /// Look up `key` and convert it to `T`. Fails with `KeyNotFound` if it is not present or
    /// `TypeMismatch` if the stored value is not a `T`; no numeric conversions are attempted.
    pub fn get_as<'a, T>(&'a self, key: &str) -> Result<T>
    where
        T: TryFrom<&'a Value, Error = Error>,
    {
        T::try_from(self.get(key)?)
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value> {
        self.entries.get_mut(key).context(KeyNotFoundSnafu { key })
    }

    /// Remove `key`, shifting later entries down so the remaining order is unchanged.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        self.entries
            .shift_remove(key)
            .context(KeyNotFoundSnafu { key })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> MapIter<'_> {
        MapIter {
            inner: self.entries.iter(),
        }
    }

    /// Number of bytes the encoder emits for this map, including its size and count headers.
    pub fn encoded_size(&self) -> usize {
        8 + self
            .entries
            .iter()
            .map(|(k, v)| 1 + k.len() + 1 + v.encoded_size())
            .sum::<usize>()
    }
}

// IndexMap equality ignores order; ours does not.
impl PartialEq for Map {
    fn eq(&self, other: &Map) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Map {
        let mut map = Map::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a str, &'a Value);
    type IntoIter = MapIter<'a>;

    fn into_iter(self) -> MapIter<'a> {
        self.iter()
    }
}

/// Iterator over the entries of a [`Map`](struct.Map.html) in insertion order.
#[derive(Clone, Debug)]
pub struct MapIter<'a> {
    inner: indexmap::map::Iter<'a, String, Value>,
}

impl<'a> Iterator for MapIter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<(&'a str, &'a Value)> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for MapIter<'_> {}
