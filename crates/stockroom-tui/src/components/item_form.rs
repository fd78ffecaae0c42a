use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use stockroom_core::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Field::Name),
            "description" => Some(Field::Description),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// The name is fixed to the value the form was seeded with.
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    None,
    Submit(Item),
    Cancel,
}

/// Controlled name/description editor. Emits the draft on submit and leaves
/// the API call to whoever owns the form.
#[derive(Debug, Clone)]
pub struct ItemForm {
    draft: Item,
    mode: FormMode,
    focus: Field,
    hint: Option<String>,
}

impl ItemForm {
    pub fn create(initial: Option<Item>) -> Self {
        Self {
            draft: initial.unwrap_or_default(),
            mode: FormMode::Create,
            focus: Field::Name,
            hint: None,
        }
    }

    pub fn edit(item: Item) -> Self {
        Self {
            draft: item,
            mode: FormMode::Edit,
            focus: Field::Description,
            hint: None,
        }
    }

    pub fn draft(&self) -> &Item {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    fn name_locked(&self) -> bool {
        self.mode == FormMode::Edit
    }

    /// Replace one field of the draft. Returns false when the field is locked.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        match field {
            Field::Name if self.name_locked() => false,
            Field::Name => {
                self.draft.name = value.into();
                true
            }
            Field::Description => {
                self.draft.description = value.into();
                true
            }
        }
    }

    /// `set_field` addressed by field name; unknown names are ignored.
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> bool {
        match Field::from_name(name) {
            Some(field) => self.set_field(field, value),
            None => false,
        }
    }

    fn focused_value(&self) -> String {
        match self.focus {
            Field::Name => self.draft.name.clone(),
            Field::Description => self.draft.description.clone(),
        }
    }

    fn edit_focused(&mut self, f: impl FnOnce(&mut String)) {
        let mut value = self.focused_value();
        f(&mut value);
        self.set_field(self.focus, value);
    }

    fn cycle_focus(&mut self) {
        if self.name_locked() {
            return;
        }
        self.focus = match self.focus {
            Field::Name => Field::Description,
            Field::Description => Field::Name,
        };
    }

    fn submit(&mut self) -> FormEvent {
        if self.mode == FormMode::Create && self.draft.name.trim().is_empty() {
            self.hint = Some("Name is required".into());
            self.focus = Field::Name;
            return FormEvent::None;
        }
        FormEvent::Submit(self.draft.clone())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        self.hint = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => self.submit(),
                _ => FormEvent::None,
            };
        }

        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Tab | KeyCode::BackTab => self.cycle_focus(),
            KeyCode::Enter => match self.focus {
                Field::Name => self.cycle_focus(),
                Field::Description => self.edit_focused(|v| v.push('\n')),
            },
            KeyCode::Backspace => self.edit_focused(|v| {
                v.pop();
            }),
            KeyCode::Char(c) => self.edit_focused(|v| v.push(c)),
            _ => {}
        }
        FormEvent::None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let title = match self.mode {
            FormMode::Create => " New Item ",
            FormMode::Edit => " Edit Item ",
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label_style = |field: Field| {
            if self.focus == field {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default()
            }
        };

        let name_value = if self.name_locked() {
            Span::styled(
                format!("{} (locked)", self.draft.name),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(self.draft.name.as_str())
        };

        let mut lines = vec![
            Line::from(vec![Span::styled("Name: ", label_style(Field::Name)), name_value]),
            Line::from(""),
            Line::from(Span::styled("Description:", label_style(Field::Description))),
        ];
        lines.extend(
            self.draft
                .description
                .split('\n')
                .map(|l| Line::from(l.to_string())),
        );
        if let Some(ref hint) = self.hint {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                hint.as_str(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
