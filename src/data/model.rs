use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Value – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common CSV dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --
//
// Integer and Float share one ordering group and compare numerically, so a
// column holding `100` and `99.5` sorts the way a spreadsheet user expects
// instead of splitting by variant.

impl Value {
    fn group(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::String(_) => 3,
        }
    }

    /// Try to interpret the value as an `f64` for plotting and binning.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        let ga = self.group();
        let gb = other.group();
        if ga != gb {
            return ga.cmp(&gb);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            // Mixed Integer/Float or Float/Float: numeric total order.
            _ => {
                let a = self.as_f64().unwrap_or(f64::NAN);
                let b = other.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.group().hash(state);
        match self {
            Value::String(s) => s.hash(state),
            // Numerics hash through f64 bits so Integer(1) and Float(1.0),
            // which compare equal, also hash identically.
            Value::Integer(i) => (*i as f64).to_bits().hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the parsed dataset and every derived view of it
// ---------------------------------------------------------------------------

/// An immutable table: ordered named columns over row-major cells.
///
/// Invariants: every row has `columns.len()` cells; column names are unique.
/// Pipeline stages never mutate a `Table` in place; each produces a fresh one.
#[derive(Debug, Clone)]
pub struct Table {
    /// Column names in source header order.
    pub columns: Vec<String>,
    /// Row-major cells, each row as wide as `columns`.
    pub rows: Vec<Vec<Value>>,
    /// For each column the sorted set of unique values (drives the filter UI).
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl Table {
    /// Build a table and its unique-value index.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));

        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = columns
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();
        for row in &rows {
            for (col, val) in columns.iter().zip(row) {
                if let Some(set) = unique_values.get_mut(col) {
                    set.insert(val.clone());
                }
            }
        }
        Table {
            columns,
            rows,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Clone out one column's values in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_order_across_variants() {
        let mut vals = vec![
            Value::Float(99.5),
            Value::Integer(100),
            Value::Integer(7),
            Value::Float(7.5),
        ];
        vals.sort();
        assert_eq!(
            vals,
            vec![
                Value::Integer(7),
                Value::Float(7.5),
                Value::Float(99.5),
                Value::Integer(100),
            ]
        );
    }

    #[test]
    fn integer_and_float_with_same_magnitude_are_equal() {
        assert_eq!(Value::Integer(3), Value::Float(3.0));
        let mut set = BTreeSet::new();
        set.insert(Value::Integer(3));
        assert!(set.contains(&Value::Float(3.0)));
    }

    #[test]
    fn table_builds_unique_value_index() {
        let t = Table::new(
            vec!["region".into(), "sales".into()],
            vec![
                vec![Value::String("West".into()), Value::Integer(10)],
                vec![Value::String("East".into()), Value::Integer(20)],
                vec![Value::String("West".into()), Value::Integer(30)],
            ],
        );
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.unique_values["region"].len(), 2);
        assert_eq!(t.unique_values["sales"].len(), 3);
        assert_eq!(t.column_index("sales"), Some(1));
        assert_eq!(t.column_index("missing"), None);
    }
}
