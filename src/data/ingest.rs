use super::error::ExploreError;
use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// CSV ingestion: raw upload bytes → Table
// ---------------------------------------------------------------------------

/// Parse raw uploaded bytes as comma-delimited text with a header row.
///
/// Fails with [`ExploreError::Parse`] on malformed input (ragged rows,
/// invalid UTF-8) or when no columns can be recovered. A header-only file
/// yields a zero-row table. Column order matches the source header order;
/// duplicate header names are suffixed (`region`, `region.1`, ...) so the
/// unique-name invariant holds.
pub fn ingest(bytes: &[u8]) -> Result<Table, ExploreError> {
    let mut reader = csv::ReaderBuilder::new().from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ExploreError::Parse(format!("reading header row: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ExploreError::Parse(
            "no columns recovered from upload".to_string(),
        ));
    }

    let columns = dedup_headers(headers);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| ExploreError::Parse(format!("row {row_no}: {e}")))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Table::new(columns, rows))
}

/// Make header names unique by suffixing repeats with `.1`, `.2`, ...
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for name in headers {
        if !seen.contains(&name) {
            seen.push(name);
            continue;
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{name}.{n}");
            if !seen.contains(&candidate) {
                seen.push(candidate);
                break;
            }
            n += 1;
        }
    }
    seen
}

fn guess_cell_type(s: &str) -> Value {
    let s = s.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALES: &str = "\
date,region,sales
2024-01-01,West,120
2024-01-02,East,80
2024-01-03,West,95.5
";

    #[test]
    fn ingest_preserves_header_order_and_types() {
        let t = ingest(SALES.as_bytes()).unwrap();
        assert_eq!(t.columns, vec!["date", "region", "sales"]);
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.rows[0][1], Value::String("West".into()));
        assert_eq!(t.rows[0][2], Value::Integer(120));
        assert_eq!(t.rows[2][2], Value::Float(95.5));
    }

    #[test]
    fn ingest_empty_upload_fails() {
        assert!(matches!(ingest(b""), Err(ExploreError::Parse(_))));
    }

    #[test]
    fn ingest_header_only_yields_zero_rows() {
        let t = ingest(b"a,b,c\n").unwrap();
        assert_eq!(t.n_cols(), 3);
        assert!(t.is_empty());
    }

    #[test]
    fn ingest_ragged_row_fails() {
        let result = ingest(b"a,b\n1,2\n3\n");
        assert!(matches!(result, Err(ExploreError::Parse(_))));
    }

    #[test]
    fn ingest_mangles_duplicate_headers() {
        let t = ingest(b"x,x,x\n1,2,3\n").unwrap();
        assert_eq!(t.columns, vec!["x", "x.1", "x.2"]);
    }

    #[test]
    fn empty_cells_become_null() {
        let t = ingest(b"a,b\n1,\n").unwrap();
        assert_eq!(t.rows[0][1], Value::Null);
    }

    #[test]
    fn booleans_are_detected() {
        let t = ingest(b"flag\ntrue\nfalse\n").unwrap();
        assert_eq!(t.rows[0][0], Value::Bool(true));
        assert_eq!(t.rows[1][0], Value::Bool(false));
    }
}
