//! Transformation config and engine
//!
//! A `TransformationConfig` describes which columns are shown, in which
//! order, how rows are sorted and which per-column regex filters apply.
//! `apply` turns a `RawTable` plus a config into the ordered row indices
//! that make up the current view.

use super::table::RawTable;
use crate::error::{FilterKind, WranglerError};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Value shown for columns that are configured but absent from the table
pub const FAKE_VALUE: &str = "NO DATA";

/// Display, sort and filter settings for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransformationConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_headers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_by_column: String,
    #[serde(default = "default_ascending")]
    pub sort_ascending: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub include_regex_by_column: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exclude_regex_by_column: BTreeMap<String, String>,
}

fn default_ascending() -> bool {
    true
}

/// Accept `null` wherever an empty value is meant
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            column_headers: Vec::new(),
            sort_by_column: String::new(),
            sort_ascending: true,
            include_regex_by_column: BTreeMap::new(),
            exclude_regex_by_column: BTreeMap::new(),
        }
    }
}

impl TransformationConfig {
    /// Show every table column in source order, unsorted and unfiltered
    pub fn default_for(table: &RawTable) -> Self {
        Self {
            column_headers: table.headers().to_vec(),
            ..Self::default()
        }
    }

    pub fn from_json(data: &str) -> Result<Self, WranglerError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Tab-indented JSON, the format used for presets and saved files
    pub fn to_json(&self) -> Result<String, WranglerError> {
        to_tab_json(self)
    }

    /// Check that every stored pattern compiles
    pub fn validate(&self) -> Result<(), WranglerError> {
        for (column, pattern) in &self.include_regex_by_column {
            compile(column, FilterKind::Include, pattern)?;
        }
        for (column, pattern) in &self.exclude_regex_by_column {
            compile(column, FilterKind::Exclude, pattern)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a column unless it is already shown
    pub fn add_column(&mut self, name: &str) {
        if !self.column_headers.iter().any(|h| h == name) {
            self.column_headers.push(name.to_string());
        }
    }

    /// Remove the column at `index`; out of range is a no-op
    pub fn remove_column(&mut self, index: usize) -> Option<String> {
        if index < self.column_headers.len() {
            Some(self.column_headers.remove(index))
        } else {
            None
        }
    }

    /// Move the column at `index` by `delta` positions, clamped to the ends.
    ///
    /// Returns the column's new index, or `None` when `index` is out of range.
    pub fn move_column(&mut self, index: usize, delta: isize) -> Option<usize> {
        let len = self.column_headers.len();
        if index >= len {
            return None;
        }

        let target = (index as isize + delta).clamp(0, len as isize - 1) as usize;
        if target != index {
            let header = self.column_headers.remove(index);
            self.column_headers.insert(target, header);
        }
        Some(target)
    }

    /// Sort by `column`; picking the current sort column flips the direction
    pub fn set_sort(&mut self, column: &str) {
        if self.sort_by_column != column {
            self.sort_by_column = column.to_string();
            self.sort_ascending = true;
        } else {
            self.sort_ascending = !self.sort_ascending;
        }
    }

    /// Set or clear the include/exclude patterns of a column.
    ///
    /// `None` leaves that side untouched, an empty string clears it. Both
    /// patterns are validated before anything changes, so a bad pattern
    /// leaves the previous filter in place.
    pub fn set_filter(
        &mut self,
        column: &str,
        include: Option<&str>,
        exclude: Option<&str>,
    ) -> Result<(), WranglerError> {
        if let Some(pattern) = include.filter(|p| !p.is_empty()) {
            compile(column, FilterKind::Include, pattern)?;
        }
        if let Some(pattern) = exclude.filter(|p| !p.is_empty()) {
            compile(column, FilterKind::Exclude, pattern)?;
        }

        if let Some(pattern) = include {
            update_pattern(&mut self.include_regex_by_column, column, pattern);
        }
        if let Some(pattern) = exclude {
            update_pattern(&mut self.exclude_regex_by_column, column, pattern);
        }
        Ok(())
    }

    pub fn include_pattern(&self, column: &str) -> Option<&str> {
        self.include_regex_by_column.get(column).map(|s| s.as_str())
    }

    pub fn exclude_pattern(&self, column: &str) -> Option<&str> {
        self.exclude_regex_by_column.get(column).map(|s| s.as_str())
    }

    pub fn has_filter(&self, column: &str) -> bool {
        self.include_regex_by_column.contains_key(column)
            || self.exclude_regex_by_column.contains_key(column)
    }

    /// Header text with sort and filter markers
    pub fn decorate_header(&self, header: &str) -> String {
        let mut decorated = header.to_string();

        if self.sort_by_column == header {
            decorated.push_str(if self.sort_ascending { "(↑)" } else { "(↓)" });
        }
        if self.has_filter(header) {
            decorated.push_str("(F)");
        }

        decorated
    }
}

fn update_pattern(patterns: &mut BTreeMap<String, String>, column: &str, pattern: &str) {
    if pattern.is_empty() {
        patterns.remove(column);
    } else {
        patterns.insert(column.to_string(), pattern.to_string());
    }
}

fn compile(column: &str, kind: FilterKind, pattern: &str) -> Result<Regex, WranglerError> {
    Regex::new(pattern).map_err(|source| WranglerError::InvalidFilter {
        column: column.to_string(),
        kind,
        source,
    })
}

/// Serialize with tab indentation
pub fn to_tab_json<T: Serialize>(value: &T) -> Result<String, WranglerError> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Engine
// ═══════════════════════════════════════════════════════════════════════════════

/// Compute the view: filtered and sorted row indices into `table`.
///
/// Filters run per displayed column in config order and narrow the
/// surviving set (logical AND). Columns missing from the table never filter
/// and never sort. Patterns are compiled on every call.
pub fn apply(table: &RawTable, config: &TransformationConfig) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..table.num_entries()).collect();

    for header in &config.column_headers {
        let Some(entries) = table.column(header) else {
            continue;
        };

        if let Some(pattern) = config.include_pattern(header) {
            match compile(header, FilterKind::Include, pattern) {
                Ok(regex) => indices.retain(|&i| regex.is_match(&entries[i])),
                Err(e) => warn!("skipping filter: {}", e),
            }
        }

        if let Some(pattern) = config.exclude_pattern(header) {
            match compile(header, FilterKind::Exclude, pattern) {
                Ok(regex) => indices.retain(|&i| !regex.is_match(&entries[i])),
                Err(e) => warn!("skipping filter: {}", e),
            }
        }
    }

    if let Some(sort_column) = table.column(&config.sort_by_column) {
        if config.sort_ascending {
            indices.sort_by(|&a, &b| sort_column[a].cmp(&sort_column[b]));
        } else {
            indices.sort_by(|&a, &b| sort_column[b].cmp(&sort_column[a]));
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::ParseMode;

    fn sample_table() -> RawTable {
        RawTable::parse(
            "NAME STATE CPU\n\
             sshd sleep 0.1\n\
             vim run 3.5\n\
             xorg run 1.2\n\
             cron sleep 0.0\n",
            ParseMode::Whitespace,
        )
    }

    #[test]
    fn test_apply_identity() {
        let table = sample_table();
        let config = TransformationConfig::default_for(&table);

        assert_eq!(apply(&table, &config), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_apply_is_deterministic() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        config.set_filter("STATE", Some("run"), None).unwrap();
        config.set_sort("CPU");

        let first = apply(&table, &config);
        let second = apply(&table, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filters_compose_as_and() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        config.set_filter("STATE", Some("r"), None).unwrap();
        config.set_filter("NAME", None, Some("x")).unwrap();

        // run rows are vim and xorg, xorg is excluded by NAME
        assert_eq!(apply(&table, &config), vec![1]);
    }

    #[test]
    fn test_include_is_unanchored() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        config.set_filter("NAME", Some("o"), None).unwrap();

        assert_eq!(apply(&table, &config), vec![2, 3]);
    }

    #[test]
    fn test_filter_on_hidden_column_is_ignored() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        config.set_filter("STATE", Some("run"), None).unwrap();
        config.remove_column(1);

        assert_eq!(apply(&table, &config), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_fake_columns_never_filter_or_sort() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        config.add_column("MEM");
        config.include_regex_by_column.insert("MEM".into(), "nothing".into());
        config.sort_by_column = "MEM".to_string();

        assert_eq!(apply(&table, &config), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);

        config.set_sort("NAME");
        assert_eq!(apply(&table, &config), vec![3, 0, 1, 2]);

        config.set_sort("NAME");
        assert_eq!(apply(&table, &config), vec![2, 1, 0, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        config.set_sort("STATE");

        assert_eq!(apply(&table, &config), vec![1, 2, 0, 3]);

        config.set_sort("STATE");
        assert_eq!(apply(&table, &config), vec![0, 3, 1, 2]);
    }

    #[test]
    fn test_sort_is_lexicographic() {
        let table = RawTable::parse("N\n10\n9\n100\n", ParseMode::Whitespace);
        let mut config = TransformationConfig::default_for(&table);
        config.set_sort("N");

        assert_eq!(apply(&table, &config), vec![0, 2, 1]);
    }

    #[test]
    fn test_empty_columns_yield_all_rows() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        while config.remove_column(0).is_some() {}

        assert!(config.column_headers.is_empty());
        assert_eq!(apply(&table, &config), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_set_sort_toggle_law() {
        let mut config = TransformationConfig::default();

        config.set_sort("A");
        assert!(config.sort_ascending);
        config.set_sort("A");
        assert!(!config.sort_ascending);
        config.set_sort("A");
        assert!(config.sort_ascending);

        config.set_sort("A");
        assert!(!config.sort_ascending);
        config.set_sort("B");
        assert_eq!(config.sort_by_column, "B");
        assert!(config.sort_ascending);
    }

    #[test]
    fn test_add_column_has_no_duplicates() {
        let mut config = TransformationConfig::default();
        config.add_column("A");
        config.add_column("B");
        config.add_column("A");

        assert_eq!(config.column_headers, vec!["A", "B"]);
    }

    #[test]
    fn test_remove_column_out_of_range() {
        let mut config = TransformationConfig::default();
        config.add_column("A");

        assert_eq!(config.remove_column(5), None);
        assert_eq!(config.column_headers, vec!["A"]);
        assert_eq!(config.remove_column(0), Some("A".to_string()));
    }

    #[test]
    fn test_move_column_clamps() {
        let mut config = TransformationConfig::default();
        for name in ["A", "B", "C"] {
            config.add_column(name);
        }

        assert_eq!(config.move_column(0, -1), Some(0));
        assert_eq!(config.column_headers, vec!["A", "B", "C"]);

        assert_eq!(config.move_column(0, 5), Some(2));
        assert_eq!(config.column_headers, vec!["B", "C", "A"]);

        assert_eq!(config.move_column(2, -1), Some(1));
        assert_eq!(config.column_headers, vec!["B", "A", "C"]);

        assert_eq!(config.move_column(3, 1), None);
    }

    #[test]
    fn test_set_filter_empty_clears() {
        let mut config = TransformationConfig::default();
        config.set_filter("A", Some("x"), Some("y")).unwrap();
        assert_eq!(config.include_pattern("A"), Some("x"));
        assert_eq!(config.exclude_pattern("A"), Some("y"));

        config.set_filter("A", Some(""), None).unwrap();
        assert_eq!(config.include_pattern("A"), None);
        assert_eq!(config.exclude_pattern("A"), Some("y"));
    }

    #[test]
    fn test_invalid_filter_keeps_previous() {
        let mut config = TransformationConfig::default();
        config.set_filter("A", Some("ok"), None).unwrap();

        let result = config.set_filter("A", Some("new"), Some("("));
        assert!(matches!(
            result,
            Err(WranglerError::InvalidFilter {
                kind: FilterKind::Exclude,
                ..
            })
        ));
        assert_eq!(config.include_pattern("A"), Some("ok"));
        assert_eq!(config.exclude_pattern("A"), None);
    }

    #[test]
    fn test_apply_skips_invalid_stored_pattern() {
        let table = sample_table();
        let mut config = TransformationConfig::default_for(&table);
        config.include_regex_by_column.insert("NAME".into(), "[".into());

        assert!(config.validate().is_err());
        assert_eq!(apply(&table, &config), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = TransformationConfig::default();
        assert_eq!(
            TransformationConfig::from_json(&config.to_json().unwrap()).unwrap(),
            config
        );

        config.add_column("NAME");
        config.add_column("FAKE");
        config.set_sort("NAME");
        config.set_sort("NAME");
        config.set_filter("NAME", Some("^s"), Some("d$")).unwrap();
        let json = config.to_json().unwrap();

        assert!(json.contains("\t\"ColumnHeaders\""));
        assert_eq!(TransformationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_accepts_null_fields() {
        let json = r#"{
            "ColumnHeaders": null,
            "SortByColumn": "",
            "SortAscending": false,
            "IncludeRegexByColumn": null,
            "ExcludeRegexByColumn": {"A": "b"}
        }"#;
        let config = TransformationConfig::from_json(json).unwrap();

        assert!(config.column_headers.is_empty());
        assert!(!config.sort_ascending);
        assert!(config.include_regex_by_column.is_empty());
        assert_eq!(config.exclude_pattern("A"), Some("b"));
    }

    #[test]
    fn test_decorate_header() {
        let mut config = TransformationConfig::default();
        assert_eq!(config.decorate_header("A"), "A");

        config.set_sort("A");
        assert_eq!(config.decorate_header("A"), "A(↑)");

        config.set_sort("A");
        config.set_filter("A", None, Some("x")).unwrap();
        assert_eq!(config.decorate_header("A"), "A(↓)(F)");
    }
}
