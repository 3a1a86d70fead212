use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

// One row of the leading-edge summary
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Case")]
    pub case: String,
    #[serde(rename = "x_LE")]
    pub x_le: f64,
    #[serde(rename = "p_LE")]
    pub p_le: f64,
}

impl SummaryRow {
    pub fn new(case: &str, (x_le, p_le): (f64, f64)) -> Self {
        SummaryRow {
            case: case.to_string(),
            x_le,
            p_le,
        }
    }
}

/// Fixed-width table with values rounded to two decimals.
pub fn format_table(rows: &[SummaryRow]) -> String {
    let width = rows
        .iter()
        .map(|r| r.case.len())
        .chain(std::iter::once("Case".len()))
        .max()
        .unwrap_or(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>6}  {:>6}", "Case", "x_LE", "p_LE");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<width$}  {:>6.2}  {:>6.2}",
            row.case, row.x_le, row.p_le
        );
    }
    out
}

// Create CSV writer with headers and dump the rows
pub fn write_csv(path: &Path, rows: &[SummaryRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to create CSV file: {:?}", path))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SummaryRow> {
        vec![
            SummaryRow::new("Both", (-0.4812, -1.2349)),
            SummaryRow::new("Krishnan et al. (2014)", (-0.5, -1.0)),
        ]
    }

    #[test]
    fn test_table_rounds_to_two_decimals() {
        let table = format_table(&rows());
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Case "));
        assert!(lines[1].starts_with("Both "));
        assert!(lines[1].ends_with("-0.48   -1.23"));
        assert!(lines[2].ends_with("-0.50   -1.00"));
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_csv(&path, &rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Case,x_LE,p_LE"));
        assert_eq!(lines.next(), Some("Both,-0.4812,-1.2349"));
        assert_eq!(lines.next(), Some("Krishnan et al. (2014),-0.5,-1.0"));
    }
}
