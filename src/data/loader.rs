use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::{bail, Context, Result};

use super::model::Table;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Load a table from either source, blocking the calling thread.
pub fn load(source: &Source) -> Result<Table> {
    match source {
        Source::File(path) => load_file(path),
        Source::Url(url) => fetch_url(url),
    }
}

/// Run [`load`] on a worker thread; the result arrives on the returned channel.
pub fn spawn_load(source: Source) -> Receiver<Result<Table>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load(&source).with_context(|| format!("loading {source}"));
        // The receiver may be gone if a newer load replaced this one.
        let _ = tx.send(result);
    });
    rx
}

/// Load a time-series table from a local file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma separated, header row first
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "txt" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            parse_table(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Fetch the CSV text over HTTP and tokenize it.
pub fn fetch_url(url: &str) -> Result<Table> {
    log::info!("fetching {url}");
    let text = reqwest::blocking::get(url)
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("bad response from {url}"))?
        .text()
        .context("reading response body")?;
    parse_table(text.as_bytes())
}

// ---------------------------------------------------------------------------
// CSV tokenizer
// ---------------------------------------------------------------------------

/// CSV layout (one row per province or country):
///
/// ```text
/// Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,...
/// ,Afghanistan,33.93911,67.709953,0,0,...
/// Australian Capital Territory,Australia,-35.4735,149.0124,0,0,...
/// ```
///
/// Rows are returned as plain strings; numbers are parsed by the pipeline.
/// Blank lines are dropped, short rows are kept so the pipeline can report them.
pub fn parse_table<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let header: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if header.is_empty() {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    log::debug!("tokenized {} rows, {} header fields", rows.len(), header.len());
    Ok(Table { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
,Afghanistan,33.9,67.7,0,1
\"Bonaire, Sint Eustatius and Saba\",Netherlands,12.1,-68.2,2,3
";

    #[test]
    fn parses_header_and_quoted_fields() {
        let table = parse_table(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.day_labels(), vec!["1/22/20", "1/23/20"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "Bonaire, Sint Eustatius and Saba");
        assert_eq!(table.rows[1][1], "Netherlands");
        assert_eq!(table.rows[1][5], "3");
    }

    #[test]
    fn keeps_short_rows_for_the_pipeline() {
        let table = parse_table("a,b,c,d,e\n,X,0,0\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0].len(), 4);
    }

    #[test]
    fn loads_csv_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.day_count(), 2);

        let other = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        assert!(load_file(other.path()).is_err());
    }

    #[test]
    fn background_load_reports_missing_file() {
        let rx = spawn_load(Source::File(PathBuf::from("/definitely/not/here.csv")));
        let result = rx.recv().unwrap();
        assert!(result.is_err());
    }
}
