//! Reading a master CSV into header-keyed rows.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::{
    encoding::{EncodingPolicy, TextEncoding},
    error::DimsError,
};

/// One data row keyed by (cleaned) header name. Columns a short row lacks are
/// simply absent.
pub type Row = IndexMap<String, String>;

const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// A decoded and parsed master table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Cleaned header names in file order.
    pub headers: Vec<String>,
    /// Data rows.
    pub rows: Vec<Row>,
    /// Encoding that decoded the file.
    pub encoding: TextEncoding,
    /// True when the permissive fallback decode was needed.
    pub lossy: bool,
    /// Field delimiter that was sniffed.
    pub delimiter: u8,
}

/// Read and parse `path`. A missing file is not an error: it yields `None`.
pub fn read_table(path: &Path, policy: &EncodingPolicy) -> Result<Option<Table>, DimsError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "master file not found; treating as empty");
            return Ok(None);
        }
        Err(source) => {
            return Err(DimsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let decoded = policy.decode(&bytes);
    if decoded.lossy {
        warn!(path = %path.display(), encoding = decoded.encoding.label(), "decoded with replacement");
    }

    let delimiter = sniff_delimiter(&decoded.text);
    let (headers, rows) = parse_rows(&decoded.text, delimiter).map_err(|source| DimsError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        file = %path.file_name().unwrap_or_default().to_string_lossy(),
        encoding = decoded.encoding.label(),
        rows = rows.len(),
        "read master"
    );

    Ok(Some(Table {
        headers,
        rows,
        encoding: decoded.encoding,
        lossy: decoded.lossy,
        delimiter,
    }))
}

/// Pick the delimiter that occurs most often in the header line.
///
/// Candidates are `,` `;` tab `|`; ties go to the earlier one, and a header
/// without any of them falls back to `,`.
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    let mut best = (b',', 0usize);
    for d in DELIMITERS {
        let n = header.bytes().filter(|&b| b == d).count();
        if n > best.1 {
            best = (d, n);
        }
    }
    best.0
}

/// Parse CSV text into cleaned headers and rows.
///
/// Header cells are trimmed and lose any leading BOM. Malformed records are
/// skipped with a warning; a broken header row is an error.
pub fn parse_rows(text: &str, delimiter: u8) -> Result<(Vec<String>, Vec<Row>), csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, rec) in reader.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn!(line = idx + 2, error = %e, "skipping malformed CSV record");
                continue;
            }
        };
        let row: Row = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok((headers, rows))
}
