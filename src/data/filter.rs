use std::collections::{BTreeMap, BTreeSet};

use super::error::ExploreError;
use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Filter predicate: which values are accepted per column
// ---------------------------------------------------------------------------

/// Per-column accepted-value sets: column_name → set of accepted values.
/// A column absent from the map, or mapped to an empty set, is unfiltered.
pub type FilterSpec = BTreeMap<String, BTreeSet<Value>>;

/// Single-key sort applied after filtering.
#[derive(Debug, Clone)]
pub struct SortSpec {
    pub column: String,
    pub ascending: bool,
}

// ---------------------------------------------------------------------------
// filter_and_sort: membership filters, then a stable single-key sort
// ---------------------------------------------------------------------------

/// Retain rows whose value in each filtered column is a member of that
/// column's accepted set (filters compose conjunctively), then stably sort
/// by `sort.column` in the requested direction. Ties keep their relative
/// input order, for ascending and descending alike.
///
/// Fails with [`ExploreError::UnknownColumn`] when a filter names a column
/// the table lacks and [`ExploreError::InvalidSortColumn`] when the sort
/// target is missing. The input table is never mutated.
pub fn filter_and_sort(
    table: &Table,
    filters: &FilterSpec,
    sort: &SortSpec,
) -> Result<Table, ExploreError> {
    // Resolve filter columns up front; empty sets impose no constraint.
    let mut active: Vec<(usize, &BTreeSet<Value>)> = Vec::new();
    for (col, accepted) in filters {
        let idx = table
            .column_index(col)
            .ok_or_else(|| ExploreError::UnknownColumn(col.clone()))?;
        if !accepted.is_empty() {
            active.push((idx, accepted));
        }
    }

    let sort_idx = table
        .column_index(&sort.column)
        .ok_or_else(|| ExploreError::InvalidSortColumn(sort.column.clone()))?;

    let mut rows: Vec<Vec<Value>> = table
        .rows
        .iter()
        .filter(|row| active.iter().all(|(idx, accepted)| accepted.contains(&row[*idx])))
        .cloned()
        .collect();

    // Stable sort; reversing the comparator (not the rows) keeps tie order.
    rows.sort_by(|a, b| {
        let ord = a[sort_idx].cmp(&b[sort_idx]);
        if sort.ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    Ok(Table::new(table.columns.clone(), rows))
}
