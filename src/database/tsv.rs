//! Tab-separated table reader.
//!
//! The first line that is neither blank nor `#`-prefixed is the header. The
//! same skip rule applies to every later line. Fields are trimmed one by one
//! after splitting, so an empty leading field never shifts the columns.

use std::collections::HashMap;
use std::path::Path;

use super::DbError;

#[derive(Debug, Default, Clone)]
pub struct TsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<TsvRow>,
}

impl TsvTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// One data line keyed by header name. Short lines read as empty cells.
#[derive(Debug, Default, Clone)]
pub struct TsvRow {
    cols: HashMap<String, String>,
}

impl TsvRow {
    /// Raw (trimmed) cell, or "" when the column is absent.
    pub fn get(&self, key: &str) -> &str {
        self.cols.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        let v: i64 = self.get(key).parse().ok()?;
        Some(v as i32)
    }

    /// Accepts 0/1, true/false, yes/no in any case; anything else is `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => default,
        }
    }

    /// Splits on `|` or `,`, trimming tokens and dropping empty ones.
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .split(['|', ','])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Parses TSV text. `path` is only used for diagnostics.
pub fn parse_tsv(text: &str, path: &Path) -> Result<TsvTable, DbError> {
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
        match &headers {
            None => headers = Some(parts.iter().map(|s| s.to_string()).collect()),
            Some(hdr) => {
                let cols = hdr
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), parts.get(i).copied().unwrap_or("").to_string()))
                    .collect();
                rows.push(TsvRow { cols });
            }
        }
    }

    let headers = headers.ok_or_else(|| DbError::MissingHeader {
        path: path.to_path_buf(),
    })?;
    Ok(TsvTable { headers, rows })
}

pub fn read_tsv_file(path: &Path) -> Result<TsvTable, DbError> {
    let text = std::fs::read_to_string(path).map_err(|source| DbError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tsv(&text, path)
}
