use crate::value::Value;
use indexmap::IndexMap;
use std::fmt;

/// One key/value entry of a [`MultiMap`].
#[derive(Clone, Debug, PartialEq)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

/// An ordered sequence of key/value entries with multi-valued key lookup.
///
/// Unlike a plain map, inserting the same key twice keeps both entries:
/// iteration order is insertion order, [`get`] returns the value of the
/// *first* entry with a key, and [`index`] collects every entry with a key
/// into a fresh map. Keys and values are themselves [`Value`]s; the lookup
/// side is indexed by the key's text projection.
///
/// A `MultiMap` is never mutated after construction. Operations that
/// "modify" one return a new map.
///
/// [`get`]: MultiMap::get
/// [`index`]: MultiMap::index
#[derive(Clone, Debug, Default)]
pub struct MultiMap {
    entries: Vec<MapEntry>,
    index: IndexMap<String, Vec<usize>>,
}

impl MultiMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from entries, indexing keys in insertion order.
    pub fn from_entries(entries: Vec<MapEntry>) -> Self {
        let mut index: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (position, entry) in entries.iter().enumerate() {
            index
                .entry(entry.key.to_string())
                .or_default()
                .push(position);
        }
        Self { entries, index }
    }

    /// Build a map from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::from_entries(
            pairs
                .into_iter()
                .map(|(key, value)| MapEntry {
                    key: key.into(),
                    value: value.into(),
                })
                .collect(),
        )
    }

    /// Build a list-shaped map: values keyed by their 1-based position.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::from_entries(
            values
                .into_iter()
                .enumerate()
                .map(|(position, value)| MapEntry {
                    key: Value::from((position + 1) as f64),
                    value,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Key/value pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|entry| &entry.value)
    }

    /// Value of the first entry.
    pub fn first(&self) -> Option<&Value> {
        self.entries.first().map(|entry| &entry.value)
    }

    /// Value of the last entry.
    pub fn last(&self) -> Option<&Value> {
        self.entries.last().map(|entry| &entry.value)
    }

    /// The nth entry, 1-indexed.
    pub fn entry(&self, n: usize) -> Option<&MapEntry> {
        n.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Whether any entry's key projects to `key`.
    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Value of the first entry whose key projects to `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let &position = self.index.get(key)?.first()?;
        Some(&self.entries[position].value)
    }

    /// Every entry whose key projects to `key`, as a fresh map with keys
    /// renumbered 1..n. `None` when the key is absent.
    pub fn index(&self, key: &str) -> Option<MultiMap> {
        let positions = self.index.get(key)?;
        Some(Self::from_values(
            positions
                .iter()
                .map(|&position| self.entries[position].value.clone()),
        ))
    }

    /// A map keeping only the first entry for each distinct value.
    pub fn unique(&self) -> MultiMap {
        let mut seen: Vec<&Value> = Vec::new();
        let mut entries = Vec::new();
        for entry in &self.entries {
            if seen.contains(&&entry.value) {
                continue;
            }
            seen.push(&entry.value);
            entries.push(entry.clone());
        }
        Self::from_entries(entries)
    }

    /// Join the text projections of values `from..=to` (1-indexed, clamped)
    /// with `sep`.
    pub fn concat(&self, sep: &str, from: usize, to: usize) -> String {
        let from = from.max(1);
        let to = to.min(self.entries.len());
        if from > to {
            return String::new();
        }
        self.entries[from - 1..to]
            .iter()
            .map(|entry| entry.value.to_string())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl PartialEq for MultiMap {
    fn eq(&self, other: &Self) -> bool {
        // The index is derived from the entries.
        self.entries == other.entries
    }
}

impl fmt::Display for MultiMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some(value) => write!(f, "{value}"),
            None => Ok(()),
        }
    }
}
