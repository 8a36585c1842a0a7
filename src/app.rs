//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App coordinates between the grid, the modes and the dialogs; table logic
//! lives in the model.

use crate::action::{Action, ModeKind, Motion};
use crate::component::Component;
use crate::components::{
    calculate_main_layout, ColumnDialog, ControlPanel, FilterDialog, GridComponent,
    GridRenderContext, PresetDialog, SaveDialog,
};
use crate::model::preset::write_atomic;
use crate::model::{CellRect, Cursor, DomainState, Modal, ModalStack, Viewport, HEADER_ROWS};
use crate::modes::{HelpTopic, Mode, ModeStack, TableMode};
use crate::services::{render_table, Clipboard};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::path::Path;
use tracing::{debug, info, warn};

const NO_COLUMNS_LEFT: &str = "Only to find Gideon's bible...";

const DIALOG_TOPICS: &[HelpTopic] = &[HelpTopic::App, HelpTopic::Dialog];

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (table, transformation, presets)
    pub domain: DomainState,

    /// Selection modes, the top one is active
    pub modes: ModeStack,

    /// Selected grid position
    pub cursor: Cursor,

    /// Scroll offsets of the grid
    pub viewport: Viewport,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Text for the message bar
    pub status_message: Option<String>,

    /// Whether the control panel is shown
    pub panel_visible: bool,

    /// Draw separators between cells
    pub fat_table: bool,

    /// Colour the table printed on exit
    pub fluff: bool,

    /// Printed on stdout once the terminal is restored
    pub exit_output: Option<String>,

    clipboard: Box<dyn Clipboard>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub grid: GridComponent,
    pub control_panel: ControlPanel,
    pub filter_dialog: FilterDialog,
    pub save_dialog: SaveDialog,
    pub preset_dialog: PresetDialog,
    pub column_dialog: ColumnDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the app in column mode with the cursor on the first data cell
    pub fn new(domain: DomainState, clipboard: Box<dyn Clipboard>) -> App {
        let cursor = Cursor::default();
        App {
            domain,
            modes: ModeStack::new(Mode::new(ModeKind::Column), &cursor),
            cursor,
            viewport: Viewport::default(),
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            panel_visible: true,
            fat_table: false,
            fluff: true,
            exit_output: None,
            clipboard,
            grid: GridComponent::new(),
            control_panel: ControlPanel::new(),
            filter_dialog: FilterDialog::new(),
            save_dialog: SaveDialog::new(),
            preset_dialog: PresetDialog::new(),
            column_dialog: ColumnDialog::new(),
        }
    }

    pub fn with_fat_table(mut self, fat_table: bool) -> Self {
        self.fat_table = fat_table;
        self
    }

    pub fn with_fluff(mut self, fluff: bool) -> Self {
        self.fluff = fluff;
        self
    }

    /// Header of the selected column
    fn selected_header(&self) -> Option<String> {
        self.domain
            .config
            .column_headers
            .get(self.cursor.col)
            .cloned()
    }

    /// Clamp the cursor and scroll the grid after it
    fn sync_cursor(&mut self) {
        let rows = self.domain.display_row_count();
        let cols = self.domain.display_column_count();

        // nothing measured before the first draw
        if self.viewport.visible_rows == 0 {
            self.cursor.clamp(rows, cols);
        } else {
            self.viewport.follow(&mut self.cursor, rows, cols);
        }
    }

    fn move_cursor(&mut self, motion: Motion) {
        match motion {
            Motion::Up => self.cursor.row = self.cursor.row.saturating_sub(1),
            Motion::Down => self.cursor.row += 1,
            Motion::Left => self.cursor.col = self.cursor.col.saturating_sub(1),
            Motion::Right => self.cursor.col += 1,
            Motion::Top => self.cursor.row = HEADER_ROWS,
            Motion::Bottom => self.cursor.row = self.domain.display_row_count() - 1,
        }
    }

    fn copy_to_clipboard(&mut self, text: &str, message: String) {
        match self.clipboard.set_text(text) {
            Ok(()) => self.status_message = Some(message),
            Err(e) => {
                warn!("copy failed: {}", e);
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn region_text(&self, rect: &CellRect) -> String {
        rect.column_major()
            .filter_map(|(row, col)| self.domain.cell_text(row, col))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn remove_column(&mut self, index: usize) {
        if let Some(header) = self.domain.config.remove_column(index) {
            debug!(column = %header, "column removed");
        }
        if self.domain.config.column_headers.is_empty() {
            self.status_message = Some(NO_COLUMNS_LEFT.to_string());
        }
        self.domain.refresh();
    }

    fn refresh_preset_dialog(&mut self) {
        self.preset_dialog.set_presets(
            self.domain.presets.names(),
            self.domain.active_preset.as_deref(),
        );
    }

    fn refresh_column_dialog(&mut self) {
        self.column_dialog.set_columns(
            self.domain.table.headers(),
            &self.domain.config.column_headers,
        );
    }

    fn help_topics(&self) -> &'static [HelpTopic] {
        if self.modals.is_empty() {
            self.modes.top().help_topics()
        } else {
            DIALOG_TOPICS
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // App level keys work everywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Ok(Some(Action::Quit)),
                KeyCode::Char('h') => return Ok(Some(Action::TogglePanel)),
                _ => {}
            }
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        if let Some(action) = navigation_action(key) {
            return Ok(Some(action));
        }

        Ok(self.modes.top_mut().handle_key_event(key, &self.cursor))
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        self.grid.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        debug!(%action, "update");
        let follow_up = match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Resize(_, _) => None,
            Action::Quit => {
                self.domain.save_last()?;
                info!("saved last preset, quitting");
                self.should_quit = true;
                None
            }
            Action::PrintAndQuit => {
                self.exit_output = Some(render_table(&self.domain, self.fluff));
                Some(Action::Quit)
            }
            Action::PrintTransformation => {
                self.exit_output = Some(format!("{}\n", self.domain.config.to_json()?));
                Some(Action::Quit)
            }
            Action::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                None
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::Move(motion) => {
                self.move_cursor(motion);
                None
            }
            Action::Click { row, col } => {
                self.modes.top_mut().on_select(row, col, &mut self.cursor);
                self.sync_cursor();
                self.modes
                    .top_mut()
                    .on_activate(self.cursor.row, self.cursor.col, &self.cursor)
            }
            Action::Activate => {
                self.modes
                    .top_mut()
                    .on_activate(self.cursor.row, self.cursor.col, &self.cursor)
            }

            // ─────────────────────────────────────────────────────────────────
            // Modes
            // ─────────────────────────────────────────────────────────────────
            Action::PushMode(kind) => {
                let mode = Mode::new(kind);
                if mode.is_overlay() {
                    self.modes.push(mode, &self.cursor);
                } else {
                    self.modes.replace(mode, &self.cursor);
                }
                None
            }
            Action::PopMode => {
                self.modes.pop(&self.cursor);
                None
            }
            Action::SwitchMode(kind) => {
                self.modes.replace(Mode::new(kind), &self.cursor);
                None
            }

            // ─────────────────────────────────────────────────────────────────
            // Columns
            // ─────────────────────────────────────────────────────────────────
            Action::DeleteColumn => {
                if self.domain.display_column_count() > 0 {
                    self.remove_column(self.cursor.col);
                }
                None
            }
            Action::ToggleSort => {
                if let Some(header) = self.selected_header() {
                    self.domain.config.set_sort(&header);
                    self.domain.refresh();
                }
                None
            }
            Action::MoveColumn(delta) => {
                if let Some(col) = self.domain.config.move_column(self.cursor.col, delta) {
                    self.cursor.col = col;
                }
                None
            }
            Action::ToggleColumn(name) => {
                let shown = self
                    .domain
                    .config
                    .column_headers
                    .iter()
                    .position(|h| *h == name);
                match shown {
                    Some(index) => self.remove_column(index),
                    None => {
                        self.domain.config.add_column(&name);
                        self.domain.refresh();
                    }
                }
                self.refresh_column_dialog();
                None
            }

            // ─────────────────────────────────────────────────────────────────
            // Clipboard
            // ─────────────────────────────────────────────────────────────────
            Action::CopyCell { row, col } => {
                let text = self.domain.cell_text(row, col).unwrap_or_default();
                self.copy_to_clipboard(&text, format!("Copied text at ({}, {})", row, col));
                Some(Action::PopMode)
            }
            Action::CopyColumn(col) => {
                let text = self.domain.column_texts(col).join(" ");
                self.copy_to_clipboard(&text, format!("Copied column {}", col));
                Some(Action::PopMode)
            }
            Action::CopyRegion(rect) => {
                let text = self.region_text(&rect);
                self.copy_to_clipboard(&text, "Copied text".to_string());
                Some(Action::PopMode)
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenFilterDialog => {
                if let Some(column) = self.selected_header() {
                    let config = &self.domain.config;
                    self.filter_dialog.open(
                        &column,
                        config.include_pattern(&column).unwrap_or_default(),
                        config.exclude_pattern(&column).unwrap_or_default(),
                    );
                    self.modals.push(Modal::Filter { column });
                }
                None
            }
            Action::OpenSaveDialog => {
                self.save_dialog
                    .open(self.domain.active_preset.as_deref());
                self.modals.push(Modal::Save);
                None
            }
            Action::OpenPresetDialog => {
                self.refresh_preset_dialog();
                self.preset_dialog.select_active();
                self.modals.push(Modal::Presets);
                None
            }
            Action::OpenColumnDialog => {
                self.refresh_column_dialog();
                self.column_dialog.reset_selection();
                self.modals.push(Modal::Columns);
                None
            }
            Action::CloseModal => {
                self.modals.pop();
                None
            }
            Action::ApplyFilter {
                column,
                include,
                exclude,
            } => {
                match self
                    .domain
                    .config
                    .set_filter(&column, Some(&include), Some(&exclude))
                {
                    Ok(()) => {
                        self.domain.refresh();
                        self.modals.pop();
                    }
                    Err(e) => {
                        warn!("rejected filter: {}", e);
                        self.filter_dialog.set_error(e.to_string());
                    }
                }
                None
            }

            // ─────────────────────────────────────────────────────────────────
            // Presets & Files
            // ─────────────────────────────────────────────────────────────────
            Action::SavePreset(name) => {
                self.domain.save_preset(&name)?;
                info!(preset = %name, "preset saved");
                self.status_message = Some(format!("Saved preset {}", name));
                self.modals.pop();
                None
            }
            Action::SaveFile(path) => {
                let json = self.domain.config.to_json()?;
                write_atomic(Path::new(&path), json.as_bytes())?;
                info!(path = %path, "transformation saved to file");
                self.status_message = Some(format!("Saved preset to file {}", path));
                self.modals.pop();
                None
            }
            Action::UsePreset(name) => {
                if self.domain.use_preset(&name) {
                    self.status_message = Some(format!("Using preset: {}", name));
                }
                self.refresh_preset_dialog();
                None
            }
            Action::DeletePreset(name) => {
                if self.domain.delete_preset(&name)? {
                    info!(preset = %name, "preset deleted");
                }
                self.refresh_preset_dialog();
                None
            }
        };

        self.sync_cursor();
        Ok(follow_up)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let layout = calculate_main_layout(area, self.panel_visible);

        let ctx = GridRenderContext {
            domain: &self.domain,
            mode: self.modes.top(),
            mark: &self.cursor,
            fat_table: self.fat_table,
        };
        self.grid
            .draw_grid(frame, layout.grid, &ctx, &mut self.viewport);

        let message = Paragraph::new(self.status_message.clone().unwrap_or_default())
            .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        frame.render_widget(message, layout.message);

        if let Some(panel) = layout.panel {
            self.control_panel.draw_panel(
                frame,
                panel,
                self.help_topics(),
                self.domain.view.len(),
            );
        }

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, layout.grid, &modal)?;
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

/// Keys that move the cursor in every mode
fn navigation_action(key: KeyEvent) -> Option<Action> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }

    let motion = match key.code {
        KeyCode::Char('j') | KeyCode::Down => Motion::Down,
        KeyCode::Char('k') | KeyCode::Up => Motion::Up,
        KeyCode::Char('h') | KeyCode::Left => Motion::Left,
        KeyCode::Char('l') | KeyCode::Right => Motion::Right,
        KeyCode::Char('g') | KeyCode::Home => Motion::Top,
        KeyCode::Char('G') | KeyCode::End => Motion::Bottom,
        KeyCode::Enter => return Some(Action::Activate),
        _ => return None,
    };
    Some(Action::Move(motion))
}

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::Filter { .. } => self.filter_dialog.handle_key_event(key),
            Modal::Save => self.save_dialog.handle_key_event(key),
            Modal::Presets => self.preset_dialog.handle_key_event(key),
            Modal::Columns => self.column_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::Filter { .. } => self.filter_dialog.draw(frame, area),
            Modal::Save => self.save_dialog.draw(frame, area),
            Modal::Presets => self.preset_dialog.draw(frame, area),
            Modal::Columns => self.column_dialog.draw(frame, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfigSource, ParseMode, PresetStore, RawTable, LAST_PRESET_NAME};
    use crate::services::clipboard::RecordingClipboard;
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    const INPUT: &str = "PID NAME STATE\n3 init S\n1 bash R\n2 vim S\n";

    struct Harness {
        app: App,
        clipboard: RecordingClipboard,
        dir: TempDir,
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let presets = PresetStore::new(dir.path().join("presets"));
        let table = RawTable::parse(INPUT, ParseMode::Whitespace);
        let domain = DomainState::initialize(table, presets, ConfigSource::Default).unwrap();
        let clipboard = RecordingClipboard::default();
        let app = App::new(domain, Box::new(clipboard.clone()));
        Harness {
            app,
            clipboard,
            dir,
        }
    }

    /// Run an action and every follow-up, like the main loop does
    fn run(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        if let Some(action) = app.handle_key_event(KeyEvent::new(code, modifiers)).unwrap() {
            run(app, action);
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        key(app, code, KeyModifiers::NONE);
    }

    fn top_mode(app: &App) -> ModeKind {
        app.modes.top().kind()
    }

    #[test]
    fn test_starts_in_column_mode_on_first_data_row() {
        let h = harness();
        assert_eq!(top_mode(&h.app), ModeKind::Column);
        assert_eq!(h.app.cursor, Cursor::new(HEADER_ROWS, 0));
        assert!(h.app.panel_visible);
    }

    #[test]
    fn test_navigation_clamps_cursor() {
        let mut h = harness();

        press(&mut h.app, KeyCode::Char('k'));
        assert_eq!(h.app.cursor.row, HEADER_ROWS);

        press(&mut h.app, KeyCode::Char('G'));
        assert_eq!(h.app.cursor.row, 3);
        press(&mut h.app, KeyCode::Down);
        assert_eq!(h.app.cursor.row, 3);

        for _ in 0..5 {
            press(&mut h.app, KeyCode::Char('l'));
        }
        assert_eq!(h.app.cursor.col, 2);

        press(&mut h.app, KeyCode::Home);
        assert_eq!(h.app.cursor.row, HEADER_ROWS);
    }

    #[test]
    fn test_switch_mode_replaces_base() {
        let mut h = harness();

        press(&mut h.app, KeyCode::Char('v'));
        assert_eq!(top_mode(&h.app), ModeKind::Row);
        assert_eq!(h.app.modes.depth(), 1);

        press(&mut h.app, KeyCode::Char('v'));
        assert_eq!(top_mode(&h.app), ModeKind::Column);
        assert_eq!(h.app.modes.depth(), 1);
    }

    #[test]
    fn test_copy_cell_pops_copy_mode() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('j'));
        press(&mut h.app, KeyCode::Char('l'));

        press(&mut h.app, KeyCode::Char('c'));
        assert_eq!(top_mode(&h.app), ModeKind::Copy);

        press(&mut h.app, KeyCode::Char('c'));
        assert_eq!(h.clipboard.last().as_deref(), Some("bash"));
        assert_eq!(top_mode(&h.app), ModeKind::Column);
        assert_eq!(h.app.status_message.as_deref(), Some("Copied text at (2, 1)"));
    }

    #[test]
    fn test_copy_column_joins_with_spaces() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('c'));
        key(&mut h.app, KeyCode::Char('C'), KeyModifiers::SHIFT);

        assert_eq!(h.clipboard.last().as_deref(), Some("3 1 2"));
        assert_eq!(top_mode(&h.app), ModeKind::Column);
    }

    #[test]
    fn test_copy_mode_cancel_copies_nothing() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('c'));
        press(&mut h.app, KeyCode::Char('q'));

        assert!(h.clipboard.last().is_none());
        assert_eq!(top_mode(&h.app), ModeKind::Column);
        assert!(!h.app.should_quit);
    }

    #[test]
    fn test_copy_mode_enter_activates_cursor_cell() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('c'));
        press(&mut h.app, KeyCode::Char('l'));
        press(&mut h.app, KeyCode::Char('l'));
        press(&mut h.app, KeyCode::Enter);

        assert_eq!(h.clipboard.last().as_deref(), Some("S"));
        assert_eq!(top_mode(&h.app), ModeKind::Column);
    }

    #[test]
    fn test_box_copy_is_column_major() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('b'));
        assert_eq!(top_mode(&h.app), ModeKind::Box);

        press(&mut h.app, KeyCode::Char('j'));
        press(&mut h.app, KeyCode::Char('l'));
        press(&mut h.app, KeyCode::Char('c'));

        assert_eq!(h.clipboard.last().as_deref(), Some("3 1 init bash"));
        assert_eq!(top_mode(&h.app), ModeKind::Column);
        assert_eq!(h.app.status_message.as_deref(), Some("Copied text"));
    }

    #[test]
    fn test_click_in_box_mode_copies_region() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('b'));

        run(&mut h.app, Action::Click { row: 2, col: 0 });

        assert_eq!(h.clipboard.last().as_deref(), Some("3 1"));
        assert_eq!(top_mode(&h.app), ModeKind::Column);
    }

    #[test]
    fn test_click_in_column_mode_selects_column_only() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('j'));

        run(&mut h.app, Action::Click { row: 3, col: 2 });

        assert_eq!(h.app.cursor, Cursor::new(2, 2));
        assert!(h.clipboard.last().is_none());
    }

    #[test]
    fn test_sort_toggles_direction() {
        let mut h = harness();

        press(&mut h.app, KeyCode::Char('s'));
        assert_eq!(h.app.domain.config.sort_by_column, "PID");
        assert!(h.app.domain.config.sort_ascending);
        assert_eq!(h.app.domain.cell_text(1, 0).as_deref(), Some("1"));

        press(&mut h.app, KeyCode::Char('s'));
        assert!(!h.app.domain.config.sort_ascending);
        assert_eq!(h.app.domain.cell_text(1, 0).as_deref(), Some("3"));
    }

    #[test]
    fn test_move_column_cursor_follows() {
        let mut h = harness();

        key(&mut h.app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_eq!(h.app.domain.config.column_headers, vec!["NAME", "PID", "STATE"]);
        assert_eq!(h.app.cursor.col, 1);

        key(&mut h.app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        key(&mut h.app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(h.app.domain.config.column_headers, vec!["PID", "NAME", "STATE"]);
        assert_eq!(h.app.cursor.col, 0);
    }

    #[test]
    fn test_delete_every_column() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('l'));
        press(&mut h.app, KeyCode::Char('l'));

        press(&mut h.app, KeyCode::Char('x'));
        assert_eq!(h.app.domain.config.column_headers, vec!["PID", "NAME"]);
        assert_eq!(h.app.cursor.col, 1);

        press(&mut h.app, KeyCode::Char('x'));
        press(&mut h.app, KeyCode::Char('x'));
        assert!(h.app.domain.config.column_headers.is_empty());
        assert_eq!(h.app.status_message.as_deref(), Some(NO_COLUMNS_LEFT));

        // nothing left to delete, sort or filter
        press(&mut h.app, KeyCode::Char('x'));
        press(&mut h.app, KeyCode::Char('s'));
        press(&mut h.app, KeyCode::Char('f'));
        assert!(h.app.modals.is_empty());
        assert_eq!(h.app.cursor, Cursor::new(HEADER_ROWS, 0));
    }

    #[test]
    fn test_filter_dialog_applies_and_rejects() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('l'));
        press(&mut h.app, KeyCode::Char('f'));
        assert_eq!(
            h.app.modals.top(),
            Some(&Modal::Filter {
                column: "NAME".to_string()
            })
        );

        run(
            &mut h.app,
            Action::ApplyFilter {
                column: "NAME".to_string(),
                include: "^b".to_string(),
                exclude: String::new(),
            },
        );
        assert!(h.app.modals.is_empty());
        assert_eq!(h.app.domain.view, vec![1]);

        press(&mut h.app, KeyCode::Char('f'));
        assert_eq!(h.app.filter_dialog.include.value(), "^b");
        run(
            &mut h.app,
            Action::ApplyFilter {
                column: "NAME".to_string(),
                include: "(".to_string(),
                exclude: String::new(),
            },
        );

        assert!(!h.app.modals.is_empty());
        assert!(h.app.filter_dialog.error.is_some());
        assert_eq!(h.app.domain.config.include_pattern("NAME"), Some("^b"));
        assert_eq!(h.app.domain.view, vec![1]);
    }

    #[test]
    fn test_empty_view_shows_placeholder() {
        let mut h = harness();
        run(
            &mut h.app,
            Action::ApplyFilter {
                column: "PID".to_string(),
                include: "nope".to_string(),
                exclude: String::new(),
            },
        );

        assert!(h.app.domain.view.is_empty());
        assert_eq!(h.app.domain.display_row_count(), HEADER_ROWS + 1);

        press(&mut h.app, KeyCode::Char('c'));
        press(&mut h.app, KeyCode::Char('c'));
        assert_eq!(h.clipboard.last().as_deref(), Some("EMPTY"));
    }

    #[test]
    fn test_dialog_captures_keys() {
        let mut h = harness();
        key(&mut h.app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(h.app.modals.top(), Some(&Modal::Save));

        // typed into the name field, not handled by column mode
        press(&mut h.app, KeyCode::Char('x'));
        assert_eq!(h.app.domain.config.column_headers.len(), 3);
        assert_eq!(h.app.save_dialog.name.value(), "x");

        press(&mut h.app, KeyCode::Esc);
        assert!(h.app.modals.is_empty());
    }

    #[test]
    fn test_save_preset_then_use_it() {
        let mut h = harness();
        run(&mut h.app, Action::OpenSaveDialog);
        run(&mut h.app, Action::SavePreset("mine".to_string()));

        assert!(h.app.modals.is_empty());
        assert_eq!(h.app.domain.active_preset.as_deref(), Some("mine"));
        assert!(h.dir.path().join("presets").exists());

        press(&mut h.app, KeyCode::Char('x'));
        assert_eq!(h.app.domain.config.column_headers.len(), 2);

        run(&mut h.app, Action::OpenPresetDialog);
        run(&mut h.app, Action::UsePreset("mine".to_string()));
        assert_eq!(h.app.domain.config.column_headers.len(), 3);
        assert_eq!(h.app.status_message.as_deref(), Some("Using preset: mine"));
        assert_eq!(h.app.modals.top(), Some(&Modal::Presets));
    }

    #[test]
    fn test_last_preset_is_protected() {
        let mut h = harness();
        run(&mut h.app, Action::SavePreset("mine".to_string()));
        run(&mut h.app, Action::Quit);
        assert!(h.app.domain.presets.contains(LAST_PRESET_NAME));

        run(&mut h.app, Action::DeletePreset(LAST_PRESET_NAME.to_string()));
        assert!(h.app.domain.presets.contains(LAST_PRESET_NAME));

        run(&mut h.app, Action::DeletePreset("mine".to_string()));
        assert!(!h.app.domain.presets.contains("mine"));
        assert!(h.app.domain.active_preset.is_none());
    }

    #[test]
    fn test_save_file_writes_transformation() {
        let mut h = harness();
        let path = h.dir.path().join("t.json");
        press(&mut h.app, KeyCode::Char('s'));

        run(&mut h.app, Action::SaveFile(path.display().to_string()));

        let saved = std::fs::read_to_string(&path).unwrap();
        let config = crate::model::TransformationConfig::from_json(&saved).unwrap();
        assert_eq!(config, h.app.domain.config);
    }

    #[test]
    fn test_quit_saves_last() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('x'));
        press(&mut h.app, KeyCode::Char('q'));

        assert!(h.app.should_quit);
        let store = PresetStore::load(h.dir.path().join("presets"));
        assert_eq!(
            store.get(LAST_PRESET_NAME),
            Some(&h.app.domain.config)
        );
    }

    #[test]
    fn test_ctrl_c_quits_from_dialog() {
        let mut h = harness();
        run(&mut h.app, Action::OpenColumnDialog);

        key(&mut h.app, KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(h.app.should_quit);
    }

    #[test]
    fn test_print_and_quit_keeps_output() {
        let mut h = harness();
        h.app.fluff = false;

        press(&mut h.app, KeyCode::Char('p'));

        assert!(h.app.should_quit);
        let output = h.app.exit_output.clone().unwrap();
        assert!(output.starts_with("PID"));
        assert!(output.contains("bash"));
    }

    #[test]
    fn test_print_transformation() {
        let mut h = harness();
        run(&mut h.app, Action::PrintTransformation);

        assert!(h.app.should_quit);
        let output = h.app.exit_output.clone().unwrap();
        assert_eq!(
            crate::model::TransformationConfig::from_json(&output).unwrap(),
            h.app.domain.config
        );
    }

    #[test]
    fn test_column_dialog_toggles() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('x'));
        assert_eq!(h.app.domain.config.column_headers, vec!["NAME", "STATE"]);

        run(&mut h.app, Action::OpenColumnDialog);
        run(&mut h.app, Action::ToggleColumn("PID".to_string()));
        assert_eq!(
            h.app.domain.config.column_headers,
            vec!["NAME", "STATE", "PID"]
        );

        run(&mut h.app, Action::ToggleColumn("NAME".to_string()));
        assert_eq!(h.app.domain.config.column_headers, vec!["STATE", "PID"]);
        assert_eq!(h.app.modals.top(), Some(&Modal::Columns));
    }

    #[test]
    fn test_toggle_panel() {
        let mut h = harness();
        key(&mut h.app, KeyCode::Char('h'), KeyModifiers::CONTROL);
        assert!(!h.app.panel_visible);
    }

    #[test]
    fn test_draw_and_mouse() {
        let mut h = harness();
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|frame| h.app.draw(frame, frame.area()).unwrap())
            .unwrap();

        assert!(h.app.viewport.visible_rows > 0);
        assert_eq!(h.app.viewport.visible_cols, 3);

        // second data line, first column
        let click = MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 0,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        let action = h.app.handle_mouse_event(click).unwrap();
        assert_eq!(action, Some(Action::Click { row: 2, col: 0 }));
    }
}
