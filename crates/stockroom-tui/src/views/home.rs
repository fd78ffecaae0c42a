use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use stockroom_core::Item;
use tracing::{info, warn};

use super::Effect;
use crate::components::{centered_rect, FormEvent, ItemCard, ItemForm};
use crate::dispatch::{Request, Response};

const CARD_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// Which action produced the error currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    List,
    Create,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeError {
    pub failure: Failure,
    pub message: String,
}

/// The item list: a grid of cards plus the create form.
pub struct HomeView {
    items: Vec<Item>,
    phase: Phase,
    form: Option<ItemForm>,
    error: Option<HomeError>,
    selected: usize,
    pending_select: Option<String>,
    grid_columns: Cell<usize>,
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeView {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            phase: Phase::Idle,
            form: None,
            error: None,
            selected: 0,
            pending_select: None,
            grid_columns: Cell::new(1),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn form(&self) -> Option<&ItemForm> {
        self.form.as_ref()
    }

    pub fn error(&self) -> Option<&HomeError> {
        self.error.as_ref()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items.get(self.selected)
    }

    pub fn is_input_mode(&self) -> bool {
        self.form.is_some()
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        self.refresh()
    }

    fn refresh(&mut self) -> Vec<Effect> {
        self.phase = Phase::Loading;
        vec![Effect::Request(Request::ListItems)]
    }

    /// Clears a create or delete error. A list error stays until a list
    /// fetch succeeds, since the items on screen are still stale.
    fn dismiss_error(&mut self) {
        if self
            .error
            .as_ref()
            .is_some_and(|e| e.failure != Failure::List)
        {
            self.error = None;
        }
    }

    fn fail(&mut self, failure: Failure, message: String) {
        self.error = Some(HomeError { failure, message });
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if let Some(form) = self.form.as_mut() {
            return match form.handle_key(key) {
                FormEvent::Submit(item) => {
                    self.dismiss_error();
                    vec![Effect::Request(Request::CreateItem(item))]
                }
                FormEvent::Cancel => {
                    self.form = None;
                    self.dismiss_error();
                    Vec::new()
                }
                FormEvent::None => Vec::new(),
            };
        }

        self.dismiss_error();
        match key.code {
            KeyCode::Char('a') => {
                self.form = Some(ItemForm::create(None));
                Vec::new()
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('d') => match self.selected_item() {
                Some(item) => vec![Effect::Request(ItemCard::new(item).delete_request())],
                None => Vec::new(),
            },
            KeyCode::Char('e') | KeyCode::Enter => match self.selected_item() {
                Some(item) => vec![Effect::Navigate(ItemCard::new(item).edit_route())],
                None => Vec::new(),
            },
            code => {
                self.move_selection(code);
                Vec::new()
            }
        }
    }

    fn move_selection(&mut self, code: KeyCode) {
        if self.items.is_empty() {
            return;
        }
        let cols = self.grid_columns.get().max(1);
        let last = self.items.len() - 1;
        let sel = self.selected;
        self.selected = match code {
            KeyCode::Char('h') | KeyCode::Left if sel % cols > 0 => sel - 1,
            KeyCode::Char('l') | KeyCode::Right if sel % cols + 1 < cols && sel < last => sel + 1,
            KeyCode::Char('k') | KeyCode::Up if sel >= cols => sel - cols,
            KeyCode::Char('j') | KeyCode::Down if sel + cols <= last => sel + cols,
            _ => sel,
        };
    }

    pub fn apply(&mut self, response: Response) -> Vec<Effect> {
        match response {
            Response::Listed(Ok(items)) => {
                self.items = items;
                self.phase = Phase::Loaded;
                if self
                    .error
                    .as_ref()
                    .is_some_and(|e| e.failure == Failure::List)
                {
                    self.error = None;
                }
                if let Some(name) = self.pending_select.take() {
                    if let Some(idx) = self.items.iter().position(|i| i.name == name) {
                        self.selected = idx;
                    }
                }
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
                Vec::new()
            }
            Response::Listed(Err(e)) => {
                warn!("failed to list items: {e}");
                self.phase = Phase::Error;
                self.fail(Failure::List, format!("Failed to load items: {e}"));
                Vec::new()
            }
            Response::Created(Ok(item)) => {
                info!("created item {}", item.name);
                self.form = None;
                self.pending_select = Some(item.name);
                self.refresh()
            }
            Response::Created(Err(e)) => {
                warn!("failed to create item: {e}");
                self.fail(Failure::Create, format!("Create failed: {e}"));
                Vec::new()
            }
            Response::Deleted { name, result } => {
                match result {
                    Ok(_) => info!("deleted item {name}"),
                    Err(e) => {
                        warn!("failed to delete {name}: {e}");
                        self.fail(Failure::Delete, format!("Delete failed: {e}"));
                    }
                }
                self.refresh()
            }
            Response::Fetched(_) | Response::Updated(_) => Vec::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let status_line = match (&self.error, self.phase) {
            (Some(err), _) => Line::from(Span::styled(
                err.message.as_str(),
                Style::default().fg(Color::Red).bold(),
            )),
            (None, Phase::Loading) => Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::Yellow),
            )),
            (None, _) => Line::from(format!("{} items", self.items.len())),
        };
        frame.render_widget(Paragraph::new(status_line), chunks[0]);

        self.render_grid(frame, chunks[1]);

        if let Some(ref form) = self.form {
            form.render(frame, centered_rect(60, 50, area));
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let cols = match area.width {
            w if w >= 120 => 3,
            w if w >= 80 => 2,
            _ => 1,
        };
        self.grid_columns.set(cols);

        if self.items.is_empty() {
            let msg = match self.phase {
                Phase::Idle | Phase::Loading => "",
                _ => "No items yet. Press 'a' to add one.",
            };
            frame.render_widget(
                Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = self.selected / cols;
        let first_row = (selected_row + 1).saturating_sub(visible_rows);

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        for (row_idx, row_area) in row_areas.iter().enumerate() {
            let start = (first_row + row_idx) * cols;
            if start >= self.items.len() {
                break;
            }
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row_area);
            for (offset, cell) in cells.iter().enumerate() {
                let idx = start + offset;
                let Some(item) = self.items.get(idx) else {
                    break;
                };
                ItemCard::new(item)
                    .selected(idx == self.selected)
                    .render(frame, *cell);
            }
        }
    }
}
