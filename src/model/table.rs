//! Raw table model
//!
//! Column-oriented storage for the ingested text table. Built once from the
//! input text and read-only afterwards.

use clap::ValueEnum;
use std::collections::{HashMap, HashSet};

/// How data lines are split into cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ParseMode {
    /// Slice each line at the offsets where the headers start
    #[default]
    Positional,
    /// Split each line on whitespace runs
    Whitespace,
}

/// Immutable column-oriented table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    columns: HashMap<String, Vec<String>>,
    num_entries: usize,
}

impl RawTable {
    /// Parse a text blob whose first line holds the column headers.
    ///
    /// Empty lines produce no entry. Whitespace mode assigns token `i` to
    /// column `i` without realigning rows that have a different token count
    /// than the header; missing trailing tokens become empty cells and extra
    /// tokens are dropped.
    pub fn parse(input: &str, mode: ParseMode) -> Self {
        let mut lines = input
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line));

        let header_line = lines.next().unwrap_or("");
        let tokens: Vec<&str> = header_line.split_whitespace().collect();

        let starts = match mode {
            ParseMode::Positional => header_offsets(header_line, &tokens),
            ParseMode::Whitespace => Vec::new(),
        };

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); tokens.len()];
        let mut num_entries = 0;

        for line in lines {
            if line.is_empty() {
                continue;
            }

            match mode {
                ParseMode::Positional => {
                    for (i, &start) in starts.iter().enumerate() {
                        let end = starts.get(i + 1).copied().unwrap_or(line.len());
                        cells[i].push(slice_line(line, start, end).trim().to_string());
                    }
                }
                ParseMode::Whitespace => {
                    let mut values = line.split_whitespace();
                    for column in cells.iter_mut() {
                        column.push(values.next().unwrap_or("").to_string());
                    }
                }
            }

            num_entries += 1;
        }

        let headers = unique_headers(&tokens);
        let columns = headers.iter().cloned().zip(cells).collect();

        Self {
            headers,
            columns,
            num_entries,
        }
    }

    /// Column names in source order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(|c| c.as_slice())
    }

    /// Value of one cell, `None` for unknown columns or entries
    pub fn value(&self, name: &str, entry: usize) -> Option<&str> {
        self.columns
            .get(name)
            .and_then(|column| column.get(entry))
            .map(|s| s.as_str())
    }
}

/// Start offset of every header in the header line.
///
/// Each header after the first is searched for starting right after the end
/// of the previous one; the first column always starts at offset 0.
fn header_offsets(header_line: &str, tokens: &[&str]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(tokens.len());
    let mut last_end = 0;

    for (i, header) in tokens.iter().enumerate() {
        if i == 0 {
            starts.push(0);
            last_end = header.len();
            continue;
        }

        let start = header_line
            .get(last_end..)
            .and_then(|rest| rest.find(header))
            .map(|pos| pos + last_end)
            .unwrap_or(last_end);
        starts.push(start);
        last_end = start + header.len();
    }

    starts
}

/// Slice `line[start..end]`, tolerating short lines and multi-byte chars
fn slice_line(line: &str, start: usize, end: usize) -> &str {
    let start = ceil_char_boundary(line, start.min(line.len()));
    let end = ceil_char_boundary(line, end.min(line.len()));
    if start >= end {
        return "";
    }
    &line[start..end]
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Make repeated header names unique by suffixing `_2`, `_3`, ...
fn unique_headers(tokens: &[&str]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(tokens.len());

    for token in tokens {
        let mut name = token.to_string();
        let mut n = 2;
        while seen.contains(&name) {
            name = format!("{}_{}", token, n);
            n += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }

    headers
}
