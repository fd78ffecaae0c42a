use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use stockroom_core::Item;
use tracing::{info, warn};

use super::Effect;
use crate::components::{FormEvent, ItemForm};
use crate::dispatch::{Request, Response};
use crate::route::Route;

pub const FETCH_FAILED: &str = "Failed to fetch item";

pub enum EditPhase {
    Loading,
    Ready { original: Item, form: ItemForm },
    Failed(String),
}

/// Edits the description of one item, addressed by name.
pub struct EditView {
    name: String,
    phase: EditPhase,
    submit_error: Option<String>,
    saving: bool,
}

impl EditView {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase: EditPhase::Loading,
            submit_error: None,
            saving: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> &EditPhase {
        &self.phase
    }

    pub fn form(&self) -> Option<&ItemForm> {
        match &self.phase {
            EditPhase::Ready { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.phase, EditPhase::Ready { .. })
    }

    pub fn mount(&mut self) -> Vec<Effect> {
        self.phase = EditPhase::Loading;
        vec![Effect::Request(Request::GetItem(self.name.clone()))]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let EditPhase::Ready { original, form } = &mut self.phase else {
            return match key.code {
                KeyCode::Esc => vec![Effect::Navigate(Route::Home)],
                _ => Vec::new(),
            };
        };

        match form.handle_key(key) {
            FormEvent::Submit(draft) => {
                // Path and body both carry the name the item was fetched under.
                let item = Item::new(original.name.as_str(), draft.description);
                self.saving = true;
                self.submit_error = None;
                vec![Effect::Request(Request::UpdateItem {
                    name: original.name.clone(),
                    item,
                })]
            }
            FormEvent::Cancel => vec![Effect::Navigate(Route::Home)],
            FormEvent::None => Vec::new(),
        }
    }

    pub fn apply(&mut self, response: Response) -> Vec<Effect> {
        match response {
            Response::Fetched(Ok(item)) => {
                self.phase = EditPhase::Ready {
                    original: item.clone(),
                    form: ItemForm::edit(item),
                };
                Vec::new()
            }
            Response::Fetched(Err(e)) => {
                warn!("failed to fetch {}: {e}", self.name);
                self.phase = EditPhase::Failed(FETCH_FAILED.into());
                Vec::new()
            }
            Response::Updated(Ok(item)) => {
                info!("updated item {}", item.name);
                self.saving = false;
                vec![Effect::Navigate(Route::Home)]
            }
            Response::Updated(Err(e)) => {
                warn!("failed to update {}: {e}", self.name);
                self.saving = false;
                self.submit_error = Some(format!("Update failed: {e}"));
                Vec::new()
            }
            Response::Listed(_) | Response::Created(_) | Response::Deleted { .. } => Vec::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match &self.phase {
            EditPhase::Loading => {
                frame.render_widget(
                    Paragraph::new(format!("Loading {}...", self.name))
                        .style(Style::default().fg(Color::Yellow)),
                    area,
                );
            }
            EditPhase::Failed(msg) => {
                let lines = vec![
                    Line::from(Span::styled(
                        msg.as_str(),
                        Style::default().fg(Color::Red).bold(),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press Esc to go back",
                        Style::default().fg(Color::DarkGray),
                    )),
                ];
                frame.render_widget(Paragraph::new(lines), area);
            }
            EditPhase::Ready { form, .. } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);

                let status = match (&self.submit_error, self.saving) {
                    (Some(err), _) => Span::styled(
                        err.as_str(),
                        Style::default().fg(Color::Red).bold(),
                    ),
                    (None, true) => Span::styled("Saving...", Style::default().fg(Color::Yellow)),
                    (None, false) => Span::raw(""),
                };
                frame.render_widget(Paragraph::new(Line::from(status)), chunks[0]);
                form.render(frame, chunks[1]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use stockroom_service::ServiceError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn save() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn ready(item: Item) -> EditView {
        let mut view = EditView::new(item.name.as_str());
        view.mount();
        view.apply(Response::Fetched(Ok(item)));
        view
    }

    #[test]
    fn mount_fetches_by_name() {
        let mut view = EditView::new("widget");
        assert_eq!(
            view.mount(),
            vec![Effect::Request(Request::GetItem("widget".into()))]
        );
        assert!(view.form().is_none());
    }

    #[test]
    fn fetch_failure_shows_static_message_and_blocks_input() {
        let mut view = EditView::new("ghost");
        view.mount();
        view.apply(Response::Fetched(Err(ServiceError::NotFound(
            "Item not found".into(),
        ))));

        assert!(matches!(view.phase(), EditPhase::Failed(m) if m == FETCH_FAILED));
        assert!(view.form().is_none());
        assert!(view.handle_key(key(KeyCode::Char('x'))).is_empty());
        assert!(view.handle_key(save()).is_empty());
        assert_eq!(
            view.handle_key(key(KeyCode::Esc)),
            vec![Effect::Navigate(Route::Home)]
        );
    }

    #[test]
    fn submit_uses_fetched_name() {
        let mut view = ready(Item::new("widget", "blue"));
        for _ in 0.."blue".len() {
            view.handle_key(key(KeyCode::Backspace));
        }
        for c in "red".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(
            view.handle_key(save()),
            vec![Effect::Request(Request::UpdateItem {
                name: "widget".into(),
                item: Item::new("widget", "red"),
            })]
        );
        assert!(view.is_saving());
    }

    #[test]
    fn update_success_navigates_home() {
        let mut view = ready(Item::new("widget", "blue"));
        view.handle_key(save());
        assert_eq!(
            view.apply(Response::Updated(Ok(Item::new("widget", "blue")))),
            vec![Effect::Navigate(Route::Home)]
        );
    }

    #[test]
    fn update_failure_keeps_form() {
        let mut view = ready(Item::new("widget", "blue"));
        view.handle_key(key(KeyCode::Char('!')));
        view.handle_key(save());
        let effects = view.apply(Response::Updated(Err(ServiceError::Server {
            status: 500,
            message: "boom".into(),
        })));

        assert!(effects.is_empty());
        assert!(!view.is_saving());
        assert!(view.submit_error().unwrap().starts_with("Update failed"));
        assert_eq!(view.form().unwrap().draft().description, "blue!");
    }

    #[test]
    fn esc_from_form_goes_home() {
        let mut view = ready(Item::new("widget", "blue"));
        assert_eq!(
            view.handle_key(key(KeyCode::Esc)),
            vec![Effect::Navigate(Route::Home)]
        );
    }
}
