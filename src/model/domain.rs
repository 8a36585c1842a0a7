//! Domain state - table data, active transformation and presets

use super::preset::{PresetStore, LAST_PRESET_NAME};
use super::selection::{CellSelection, GridCell, HEADER_ROWS};
use super::table::RawTable;
use super::transform::{self, TransformationConfig, FAKE_VALUE};
use crate::error::WranglerError;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Text shown in the single placeholder row of an empty view
pub const EMPTY_VALUE: &str = "EMPTY";

/// Where the starting transformation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource<'a> {
    Preset(&'a str),
    File(&'a Path),
    Default,
}

/// Domain state containing the table and everything derived from it
#[derive(Debug, Clone)]
pub struct DomainState {
    /// Ingested table, never modified
    pub table: RawTable,

    /// Active transformation
    pub config: TransformationConfig,

    /// Row indices of the current view, rebuilt by `refresh`
    pub view: Vec<usize>,

    /// Saved presets
    pub presets: PresetStore,

    /// Name of the preset last used or saved
    pub active_preset: Option<String>,
}

impl DomainState {
    pub fn new(table: RawTable, config: TransformationConfig, presets: PresetStore) -> Self {
        let mut domain = Self {
            table,
            config,
            view: Vec::new(),
            presets,
            active_preset: None,
        };
        domain.refresh();
        domain
    }

    /// Build the domain state with the starting transformation.
    ///
    /// A requested preset that does not exist, or a transformation file that
    /// cannot be read or parsed, is an error.
    pub fn initialize(
        table: RawTable,
        presets: PresetStore,
        source: ConfigSource<'_>,
    ) -> Result<Self, WranglerError> {
        let (config, active_preset) = match source {
            ConfigSource::Preset(name) => {
                let config = presets
                    .get(name)
                    .cloned()
                    .ok_or_else(|| WranglerError::PresetNotFound(name.to_string()))?;
                (config, Some(name.to_string()))
            }
            ConfigSource::File(path) => {
                let data = fs::read_to_string(path).map_err(|source| {
                    WranglerError::ReadTransformation {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                let config = TransformationConfig::from_json(&data)?;
                config.validate()?;
                (config, None)
            }
            ConfigSource::Default => (TransformationConfig::default_for(&table), None),
        };

        info!(?source, "initial transformation ready");
        let mut domain = Self::new(table, config, presets);
        domain.active_preset = active_preset;
        Ok(domain)
    }

    /// Recompute the view from the table and the active config
    pub fn refresh(&mut self) {
        self.view = transform::apply(&self.table, &self.config);
        debug!(entries = self.view.len(), "view refreshed");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Grid
    // ─────────────────────────────────────────────────────────────────────────

    /// Header rows plus one row per view entry, or one placeholder row
    pub fn display_row_count(&self) -> usize {
        HEADER_ROWS + self.view.len().max(1)
    }

    pub fn display_column_count(&self) -> usize {
        self.config.column_headers.len()
    }

    pub fn is_fake(&self, header: &str) -> bool {
        !self.table.contains(header)
    }

    /// Describe the cell at a grid position, `None` when out of range
    pub fn grid_cell(&self, row: usize, col: usize, selection: CellSelection) -> Option<GridCell> {
        let header = self.config.column_headers.get(col)?;
        let is_fake = self.is_fake(header);

        let (text, is_header, is_empty) = if row < HEADER_ROWS {
            (self.config.decorate_header(header), true, false)
        } else if self.view.is_empty() {
            if row != HEADER_ROWS {
                return None;
            }
            (EMPTY_VALUE.to_string(), false, true)
        } else {
            let entry = *self.view.get(row - HEADER_ROWS)?;
            let value = self.table.value(header, entry).unwrap_or(FAKE_VALUE);
            (value.to_string(), false, false)
        };

        Some(GridCell {
            text,
            is_header,
            is_fake,
            is_empty,
            selection,
        })
    }

    /// Text the grid shows at a position
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.grid_cell(row, col, CellSelection::None)
            .map(|cell| cell.text)
    }

    /// Texts of every data row in a column
    pub fn column_texts(&self, col: usize) -> Vec<String> {
        (HEADER_ROWS..self.display_row_count())
            .filter_map(|row| self.cell_text(row, col))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Presets
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the active config with a copy of a preset
    pub fn use_preset(&mut self, name: &str) -> bool {
        let Some(config) = self.presets.get(name) else {
            return false;
        };
        self.config = config.clone();
        self.active_preset = Some(name.to_string());
        self.refresh();
        info!(preset = name, "using preset");
        true
    }

    /// Store the active config under `name` and write the preset file
    pub fn save_preset(&mut self, name: &str) -> Result<(), WranglerError> {
        self.presets.insert(name, &self.config);
        self.active_preset = Some(name.to_string());
        self.presets.save()
    }

    /// Delete a preset and write the preset file; `last` is left alone
    pub fn delete_preset(&mut self, name: &str) -> Result<bool, WranglerError> {
        if !self.presets.remove(name) {
            return Ok(false);
        }
        if self.active_preset.as_deref() == Some(name) {
            self.active_preset = None;
        }
        self.presets.save()?;
        Ok(true)
    }

    /// Record the active config as the `last` preset and write the file
    pub fn save_last(&mut self) -> Result<(), WranglerError> {
        self.presets.insert(LAST_PRESET_NAME, &self.config);
        self.presets.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::ParseMode;

    fn sample_domain(presets: PresetStore) -> DomainState {
        let table = RawTable::parse("ID NAME\n1 a\n2 b\n3 c\n", ParseMode::Whitespace);
        DomainState::initialize(table, presets, ConfigSource::Default).unwrap()
    }

    #[test]
    fn test_default_source_shows_all_columns() {
        let domain = sample_domain(PresetStore::new("presets"));

        assert_eq!(domain.config.column_headers, vec!["ID", "NAME"]);
        assert_eq!(domain.view, vec![0, 1, 2]);
        assert_eq!(domain.display_row_count(), 4);
        assert!(domain.active_preset.is_none());
    }

    #[test]
    fn test_missing_preset_is_an_error() {
        let table = RawTable::parse("A\n1\n", ParseMode::Whitespace);
        let result = DomainState::initialize(
            table,
            PresetStore::new("presets"),
            ConfigSource::Preset("nope"),
        );

        assert!(matches!(result, Err(WranglerError::PresetNotFound(name)) if name == "nope"));
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        let mut config = TransformationConfig::default();
        config.add_column("NAME");
        config.set_filter("NAME", None, Some("b")).unwrap();
        fs::write(&path, config.to_json().unwrap()).unwrap();

        let table = RawTable::parse("ID NAME\n1 a\n2 b\n", ParseMode::Whitespace);
        let domain = DomainState::initialize(
            table,
            PresetStore::new(dir.path().join("presets")),
            ConfigSource::File(&path),
        )
        .unwrap();

        assert_eq!(domain.config, config);
        assert_eq!(domain.view, vec![0]);
    }

    #[test]
    fn test_unparsable_file_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        fs::write(&path, "[1, 2").unwrap();

        let table = RawTable::parse("A\n1\n", ParseMode::Whitespace);
        let result = DomainState::initialize(
            table,
            PresetStore::new("presets"),
            ConfigSource::File(&path),
        );

        assert!(matches!(result, Err(WranglerError::ParseTransformation(_))));
    }

    #[test]
    fn test_grid_cells() {
        let mut domain = sample_domain(PresetStore::new("presets"));
        domain.config.add_column("FAKE");
        domain.config.set_sort("ID");
        domain.config.set_sort("ID");
        domain.refresh();

        let header = domain.grid_cell(0, 0, CellSelection::None).unwrap();
        assert!(header.is_header);
        assert_eq!(header.text, "ID(↓)");

        assert_eq!(domain.cell_text(1, 1).as_deref(), Some("c"));
        let fake = domain.grid_cell(1, 2, CellSelection::Primary).unwrap();
        assert!(fake.is_fake);
        assert_eq!(fake.text, FAKE_VALUE);
        assert_eq!(fake.selection, CellSelection::Primary);

        assert!(domain.grid_cell(4, 0, CellSelection::None).is_none());
        assert!(domain.grid_cell(1, 3, CellSelection::None).is_none());
    }

    #[test]
    fn test_empty_view_has_placeholder_row() {
        let mut domain = sample_domain(PresetStore::new("presets"));
        domain.config.set_filter("NAME", Some("zzz"), None).unwrap();
        domain.refresh();

        assert!(domain.view.is_empty());
        assert_eq!(domain.display_row_count(), HEADER_ROWS + 1);
        let cell = domain.grid_cell(1, 0, CellSelection::None).unwrap();
        assert!(cell.is_empty);
        assert_eq!(cell.text, EMPTY_VALUE);
        assert_eq!(domain.column_texts(0), vec![EMPTY_VALUE]);
    }

    #[test]
    fn test_no_columns_has_no_cells() {
        let mut domain = sample_domain(PresetStore::new("presets"));
        domain.config.remove_column(0);
        domain.config.remove_column(0);
        domain.refresh();

        assert_eq!(domain.display_column_count(), 0);
        assert!(domain.grid_cell(1, 0, CellSelection::None).is_none());
        assert_eq!(domain.view.len(), 3);
    }

    #[test]
    fn test_use_preset_copies() {
        let dir = tempfile::tempdir().unwrap();
        let mut domain = sample_domain(PresetStore::new(dir.path().join("presets")));
        domain.config.remove_column(0);
        domain.save_preset("names").unwrap();
        assert_eq!(domain.active_preset.as_deref(), Some("names"));

        domain.config.add_column("ID");
        assert!(domain.use_preset("names"));
        assert_eq!(domain.config.column_headers, vec!["NAME"]);

        domain.config.add_column("ID");
        assert_eq!(
            domain.presets.get("names").unwrap().column_headers,
            vec!["NAME"]
        );
        assert!(!domain.use_preset("missing"));
    }

    #[test]
    fn test_delete_preset_keeps_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets");
        let mut domain = sample_domain(PresetStore::new(&path));
        domain.save_preset("mine").unwrap();
        domain.save_last().unwrap();

        assert!(!domain.delete_preset(LAST_PRESET_NAME).unwrap());
        assert!(domain.delete_preset("mine").unwrap());
        assert!(domain.active_preset.is_none());

        let reloaded = PresetStore::load(&path);
        assert_eq!(reloaded.names(), vec![LAST_PRESET_NAME]);
    }
}
