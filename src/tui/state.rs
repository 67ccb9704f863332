use crate::model::{DateFilter, EditInput, Grid};
use crate::theme::{self, PresentationAttrs, Signal, Theme};
use chrono::Local;
use ratatui::widgets::TableState;

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Editing,
    Searching,
}

pub struct AppState {
    pub grid: Grid,
    pub view_indices: Vec<usize>,
    pub table_state: TableState,
    pub selected_col: usize,
    pub mode: InputMode,
    pub input_buffer: String,
    pub cursor_position: usize,
    pub search_query: String,
    pub date_filter: DateFilter,
    pub attrs: PresentationAttrs,
    pub message: String,
    pub dirty: bool,
}

impl AppState {
    pub fn new(grid: Grid, light_switch: bool) -> Self {
        let mut t_state = TableState::default();
        t_state.select(Some(0));
        let mut attrs = PresentationAttrs::default();
        let Signal::NoUpdate = theme::on_switch(&mut attrs, light_switch);
        let mut state = Self {
            grid,
            view_indices: vec![],
            table_state: t_state,
            selected_col: 0,
            mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            search_query: String::new(),
            date_filter: DateFilter::All,
            attrs,
            message: "/: Search | e: Edit | f: Filter | t: Theme".to_string(),
            dirty: false,
        };
        state.recalculate_view();
        state
    }

    pub fn theme(&self) -> Theme {
        self.attrs.theme().unwrap_or_default()
    }

    /// The TUI's stand-in for the dashboard's theme switch: flipping it runs
    /// the switch callback against the presentation attrs. The callback's
    /// NoUpdate signal is all it ever returns; the next draw reads the
    /// attribute.
    pub fn toggle_theme(&mut self) {
        let switch_on = self.theme() == Theme::Dark;
        let Signal::NoUpdate = theme::on_switch(&mut self.attrs, switch_on);
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let from_left_to_current_index = current_index - 1;
            let before_char_to_delete = self.input_buffer.chars().take(from_left_to_current_index);
            let after_char_to_delete = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before_char_to_delete.chain(after_char_to_delete).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    /// Rebuilds the visible row set: the quick date filter narrows first
    /// (through the codec's date bridge), then the substring search runs over
    /// every displayed cell.
    pub fn recalculate_view(&mut self) {
        let query = if self.mode == InputMode::Searching {
            self.input_buffer.to_lowercase()
        } else {
            self.search_query.to_lowercase()
        };

        let today = Local::now().date_naive();
        let mut indices: Vec<usize> = match (self.grid.date_filter_field(), self.date_filter.window(today)) {
            (Some(field), Some((from, to))) => self.grid.date_range_indices(field, from, to),
            _ => (0..self.grid.rows.len()).collect(),
        };

        if !query.is_empty() {
            indices.retain(|&i| {
                self.grid.columns.iter().any(|c| {
                    self.grid
                        .display_value(i, &c.field)
                        .to_lowercase()
                        .contains(&query)
                })
            });
        }
        self.view_indices = indices;

        let sel = self.table_state.selected().unwrap_or(0);
        if self.view_indices.is_empty() {
            self.table_state.select(Some(0));
        } else if sel >= self.view_indices.len() {
            self.table_state.select(Some(self.view_indices.len() - 1));
        }
    }

    pub fn get_selected_master_index(&self) -> Option<usize> {
        if let Some(view_idx) = self.table_state.selected()
            && view_idx < self.view_indices.len()
        {
            return Some(self.view_indices[view_idx]);
        }
        None
    }

    pub fn next(&mut self) {
        let len = self.view_indices.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view_indices.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn jump_forward(&mut self, step: usize) {
        if self.view_indices.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let new_index = (current + step).min(self.view_indices.len() - 1);
        self.table_state.select(Some(new_index));
    }

    pub fn jump_backward(&mut self, step: usize) {
        if self.view_indices.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let new_index = current.saturating_sub(step);
        self.table_state.select(Some(new_index));
    }

    pub fn next_column(&mut self) {
        if self.grid.columns.is_empty() {
            return;
        }
        self.selected_col = (self.selected_col + 1).min(self.grid.columns.len() - 1);
    }

    pub fn previous_column(&mut self) {
        self.selected_col = self.selected_col.saturating_sub(1);
    }

    pub fn cycle_date_filter(&mut self) {
        self.date_filter = self.date_filter.cycle();
        self.message = match self.grid.date_filter_field() {
            Some(field) => format!("Filter: {} ({})", self.date_filter.label(), field),
            None => "Filter: no date column in this data.".to_string(),
        };
        self.recalculate_view();
    }

    /// Opens the cell editor prefilled with the current display value.
    pub fn begin_edit(&mut self) {
        let Some(row) = self.get_selected_master_index() else {
            self.message = "Nothing to edit.".to_string();
            return;
        };
        let Some(col) = self.grid.columns.get(self.selected_col) else {
            return;
        };
        if !col.editable {
            self.message = format!("{} is read-only.", col.header_name);
            return;
        }
        self.input_buffer = self.grid.display_value(row, &col.field);
        self.cursor_position = self.input_buffer.chars().count();
        self.mode = InputMode::Editing;
    }

    /// Commits the editor buffer through the grid. A rejected value keeps the
    /// editor open with the buffer intact so the user can retry.
    pub fn commit_edit(&mut self) {
        let Some(row) = self.get_selected_master_index() else {
            self.mode = InputMode::Normal;
            self.reset_input();
            return;
        };
        let Some(col) = self.grid.columns.get(self.selected_col) else {
            return;
        };
        let field = col.field.clone();
        let header = col.header_name.clone();
        if self.grid.commit_edit(row, &field, EditInput::text(&self.input_buffer)) {
            self.dirty = true;
            self.message = format!("{} updated.", header);
            self.mode = InputMode::Normal;
            self.reset_input();
            self.recalculate_view();
        } else {
            self.message = format!("Rejected: {} expects DD/MM/YYYY.", header);
        }
    }
}
