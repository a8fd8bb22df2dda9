//! Feed trimming
//!
//! Streams a zstd-compressed CSV feed and keeps the header plus the first N
//! data rows, producing a file small enough to upload.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{DashboardError, Result};

/// Rows kept when no count is given
pub const DEFAULT_TRIM_ROWS: usize = 10_000;

/// Outcome of a trim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimSummary {
    /// Data rows written, excluding the header
    pub rows_written: usize,
}

/// Copy the header line and up to `rows` data lines from `reader` to `writer`.
pub fn trim<R: Read, W: Write>(reader: R, mut writer: W, rows: usize) -> Result<TrimSummary> {
    let mut lines = BufReader::new(reader);
    let mut line = String::new();

    if lines.read_line(&mut line)? == 0 {
        writer.flush()?;
        return Ok(TrimSummary { rows_written: 0 });
    }
    writer.write_all(line.as_bytes())?;

    let mut rows_written = 0;
    while rows_written < rows {
        line.clear();
        if lines.read_line(&mut line)? == 0 {
            break;
        }
        writer.write_all(line.as_bytes())?;
        rows_written += 1;
    }

    writer.flush()?;
    Ok(TrimSummary { rows_written })
}

/// Default output location: `output_<rows>.csv` next to the input file
pub fn default_output_path(input: &Path, rows: usize) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("output_{}.csv", rows))
}

/// Decompress `input` (`.csv.zst`) and write its header plus `rows` data rows
/// to `output`, creating the output directory if needed.
pub fn trim_zst_file(input: &Path, output: &Path, rows: usize) -> Result<TrimSummary> {
    if !input.exists() {
        return Err(DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("feed file {} does not exist", input.display()),
        )));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let decoder = zstd::stream::read::Decoder::new(File::open(input)?)?;
    let writer = BufWriter::new(File::create(output)?);
    let summary = trim(decoder, writer, rows)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        rows = summary.rows_written,
        "Trimmed feed file"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "ts_recv,ts_event,price\nr1,t1,1\nr2,t2,2\nr3,t3,3\n";

    #[test]
    fn test_trim_keeps_header_and_n_rows() {
        let mut out = Vec::new();
        let summary = trim(FEED.as_bytes(), &mut out, 2).unwrap();

        assert_eq!(summary.rows_written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ts_recv,ts_event,price\nr1,t1,1\nr2,t2,2\n"
        );
    }

    #[test]
    fn test_trim_short_feed() {
        let mut out = Vec::new();
        let summary = trim(FEED.as_bytes(), &mut out, 100).unwrap();
        assert_eq!(summary.rows_written, 3);
        assert_eq!(String::from_utf8(out).unwrap(), FEED);

        let mut out = Vec::new();
        assert_eq!(trim(&b""[..], &mut out, 5).unwrap().rows_written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_trim_zst_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("feed.mbp-10.csv.zst");
        fs::write(&input, zstd::encode_all(FEED.as_bytes(), 3).unwrap()).unwrap();

        let output = dir.path().join("data").join("output_1.csv");
        let summary = trim_zst_file(&input, &output, 1).unwrap();

        assert_eq!(summary.rows_written, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "ts_recv,ts_event,price\nr1,t1,1\n"
        );
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.csv.zst");
        let output = default_output_path(&input, 10);

        assert_eq!(output, dir.path().join("output_10.csv"));
        assert!(matches!(
            trim_zst_file(&input, &output, 10),
            Err(DashboardError::Io(_))
        ));
    }
}
