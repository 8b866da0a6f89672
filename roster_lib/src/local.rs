//! In-memory search, filter, sort and paging for lists fetched in one piece.
//!
//! Records are only reached through the accessors registered in [`Columns`],
//! so any record type works.

use std::cmp::Ordering;

use roster_api::SortDirection;
use serde_json::Value;

use crate::table::TableState;

/// A field value as seen by sorting and filtering.
///
/// Ordered `Missing < Int < Text`; text compares case-insensitively first so
/// that "agnes" and "Agnes" sort together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Missing,
    Int(i64),
    Text(String),
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Int(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }

    fn matches(&self, wanted: &str) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Int(n) => wanted.trim().parse::<i64>() == Ok(*n),
            FieldValue::Text(s) => s.to_lowercase() == wanted.to_lowercase(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        match self {
            FieldValue::Missing => false,
            FieldValue::Int(n) => n.to_string().contains(needle),
            FieldValue::Text(s) => s.to_lowercase().contains(needle),
        }
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Missing => Ok(()),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Int(n)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Missing, Into::into)
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Missing,
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Int(i),
                None => FieldValue::Text(n.to_string()),
            },
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

type Accessor<T> = Box<dyn Fn(&T) -> FieldValue + Send + Sync>;

/// A named field of `T`, usable as a sort key and optionally for search and filters.
pub struct Column<T> {
    key: String,
    accessor: Accessor<T>,
    searchable: bool,
    filterable: bool,
}

impl<T> Column<T> {
    pub fn new<F>(key: &str, accessor: F) -> Self
    where
        F: Fn(&T) -> FieldValue + Send + Sync + 'static,
    {
        Self {
            key: key.to_string(),
            accessor: Box::new(accessor),
            searchable: false,
            filterable: false,
        }
    }

    /// Free-text search looks into this column.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Filters keyed by this column's name apply to it.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self, record: &T) -> FieldValue {
        (self.accessor)(record)
    }
}

impl Column<Value> {
    /// Column reading a top-level property of a JSON object.
    pub fn json(key: &str) -> Self {
        let property = key.to_string();
        Self::new(key, move |record: &Value| {
            record
                .get(&property)
                .map_or(FieldValue::Missing, FieldValue::from)
        })
    }
}

/// The set of columns a [`LocalTable`] knows about.
pub struct Columns<T> {
    columns: Vec<Column<T>>,
}

impl<T> Default for Columns<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
        }
    }
}

impl<T> Columns<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: Column<T>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }
}

/// Applies a [`TableState`] to an in-memory list.
pub struct LocalTable<T> {
    columns: Columns<T>,
}

impl<T> LocalTable<T> {
    pub fn new(columns: Columns<T>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &Columns<T> {
        &self.columns
    }

    fn is_match(&self, state: &TableState, needle: &str, record: &T) -> bool {
        if !needle.is_empty()
            && !self
                .columns
                .columns
                .iter()
                .filter(|c| c.searchable)
                .any(|c| c.value(record).contains(needle))
        {
            return false;
        }
        state
            .filters()
            .iter()
            .filter(|(_, wanted)| !wanted.is_empty())
            .all(|(key, wanted)| match self.columns.get(key) {
                Some(column) if column.filterable => column.value(record).matches(wanted),
                _ => false,
            })
    }

    /// Filters and sorts `records` by `state`, stores the match count as the
    /// state's total, and returns the records on the current page.
    ///
    /// Filters on unknown or non-filterable keys match nothing. Sorting on an
    /// unknown key keeps the input order.
    pub fn apply<'a>(&self, state: &mut TableState, records: &'a [T]) -> Vec<&'a T> {
        let needle = state.search_term().trim().to_lowercase();
        let mut matched: Vec<&'a T> = records
            .iter()
            .filter(|record| self.is_match(state, &needle, record))
            .collect();

        if let Some(key) = state.sort_by() {
            match self.columns.get(key) {
                Some(column) => {
                    let mut keyed: Vec<(FieldValue, &'a T)> = matched
                        .into_iter()
                        .map(|record| (column.value(record), record))
                        .collect();
                    let descending = state.sort_order() == SortDirection::Desc;
                    keyed.sort_by(|(a, _), (b, _)| {
                        if descending {
                            b.cmp(a)
                        } else {
                            a.cmp(b)
                        }
                    });
                    matched = keyed.into_iter().map(|(_, record)| record).collect();
                }
                None => tracing::debug!("no column {:?} to sort by", key),
            }
        }

        state.apply_total(matched.len() as i64);
        let skip = ((state.current_page() - 1) * state.page_size()) as usize;
        matched
            .into_iter()
            .skip(skip)
            .take(state.page_size() as usize)
            .collect()
    }
}
