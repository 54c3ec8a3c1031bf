//! Report export (JSON and CSV).
//!
//! CSV is a flattened view: one row per destination, errors joined with `; `.

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::models::DestinationResult;

/// Writes `value` as pretty JSON to `output`, or to stdout if `None`.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{json}").context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}

/// Writes destination results as CSV to any writer.
///
/// Returns the number of rows written (excluding the header).
pub fn write_csv<W: Write>(results: &[DestinationResult], writer: W) -> Result<usize> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record([
        "site_name",
        "attempted",
        "successful",
        "failed",
        "success_rate",
        "errors",
    ])?;

    for result in results {
        csv_writer.write_record([
            result.site_name.clone(),
            result.attempted.to_string(),
            result.successful.to_string(),
            result.failed.to_string(),
            result.success_rate.to_string(),
            result.errors.join("; "),
        ])?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(results.len())
}

/// Exports destination results to a CSV file.
pub fn export_csv(results: &[DestinationResult], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    let rows = write_csv(results, file)?;
    log::info!("Exported {} destination rows to {}", rows, path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv() {
        let mut result = DestinationResult::new("Hacker News", 2);
        result.successful = 1;
        result.failed = 1;
        result.errors = vec!["Hacker News: failed after 3 attempts".into()];
        result.finalize();

        let mut buffer = Vec::new();
        let rows = write_csv(&[result], &mut buffer).expect("csv write");
        assert_eq!(rows, 1);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("site_name,attempted,successful,failed,success_rate,errors")
        );
        assert_eq!(
            lines.next(),
            Some("Hacker News,2,1,1,50,Hacker News: failed after 3 attempts")
        );
    }

    #[test]
    fn test_export_csv_and_json_to_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let results = vec![DestinationResult::new("A", 0)];

        let csv_path = dir.path().join("out.csv");
        assert_eq!(export_csv(&results, &csv_path).unwrap(), 1);
        assert!(std::fs::read_to_string(&csv_path).unwrap().contains("A,0,0,0,0,"));

        let json_path = dir.path().join("out.json");
        write_json(&results, Some(&json_path)).unwrap();
        let parsed: Vec<DestinationResult> =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed, results);
    }
}
