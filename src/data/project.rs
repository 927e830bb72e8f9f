use super::error::ExploreError;
use super::model::Table;

// ---------------------------------------------------------------------------
// Projection: column subset + head-N for the interactive table
// ---------------------------------------------------------------------------

/// Select `selected` columns (in the given order) and the first `row_limit`
/// rows of `table`, preserving source row order.
///
/// An empty selection returns `Ok(None)`: the host must suppress the table
/// rather than render an empty one. An unknown column name fails with
/// [`ExploreError::UnknownColumn`].
pub fn project(
    table: &Table,
    selected: &[String],
    row_limit: usize,
) -> Result<Option<Table>, ExploreError> {
    if selected.is_empty() {
        return Ok(None);
    }

    let mut indices = Vec::with_capacity(selected.len());
    for name in selected {
        let idx = table
            .column_index(name)
            .ok_or_else(|| ExploreError::UnknownColumn(name.clone()))?;
        indices.push(idx);
    }

    let rows: Vec<Vec<_>> = table
        .rows
        .iter()
        .take(row_limit)
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();

    Ok(Some(Table::new(selected.to_vec(), rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    fn sales_table() -> Table {
        Table::new(
            vec!["date".into(), "region".into(), "sales".into()],
            (0..5)
                .map(|i| {
                    vec![
                        Value::String(format!("2024-01-0{}", i + 1)),
                        Value::String(if i % 2 == 0 { "West" } else { "East" }.into()),
                        Value::Integer(100 + i),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn project_selects_columns_and_truncates() {
        let t = sales_table();
        let p = project(&t, &["region".into(), "sales".into()], 3)
            .unwrap()
            .unwrap();
        assert_eq!(p.columns, vec!["region", "sales"]);
        assert_eq!(p.n_rows(), 3);
        // Values are a pure sub-selection of the source.
        for (i, row) in p.rows.iter().enumerate() {
            assert_eq!(row[0], t.rows[i][1]);
            assert_eq!(row[1], t.rows[i][2]);
        }
    }

    #[test]
    fn project_limit_beyond_row_count_keeps_all_rows() {
        let t = sales_table();
        let p = project(&t, &["date".into()], 100).unwrap().unwrap();
        assert_eq!(p.n_rows(), t.n_rows());
    }

    #[test]
    fn project_reorders_columns() {
        let t = sales_table();
        let p = project(&t, &["sales".into(), "date".into()], 5)
            .unwrap()
            .unwrap();
        assert_eq!(p.columns, vec!["sales", "date"]);
        assert_eq!(p.rows[0][0], Value::Integer(100));
    }

    #[test]
    fn project_empty_selection_produces_no_table() {
        let t = sales_table();
        assert!(project(&t, &[], 10).unwrap().is_none());
    }

    #[test]
    fn project_unknown_column_fails() {
        let t = sales_table();
        let err = project(&t, &["profit".into()], 10).unwrap_err();
        assert_eq!(err, ExploreError::UnknownColumn("profit".into()));
    }
}
