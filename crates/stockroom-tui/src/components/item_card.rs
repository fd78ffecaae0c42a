use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use stockroom_core::Item;

use crate::dispatch::Request;
use crate::route::Route;

/// Read-only view of one item. Owners decide what to do with the two
/// triggers it exposes.
pub struct ItemCard<'a> {
    item: &'a Item,
    selected: bool,
}

impl<'a> ItemCard<'a> {
    pub fn new(item: &'a Item) -> Self {
        Self {
            item,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn edit_route(&self) -> Route {
        Route::edit(self.item.name.as_str())
    }

    pub fn delete_request(&self) -> Request {
        Request::DeleteItem(self.item.name.clone())
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .title(format!(" {} ", self.item.name))
            .borders(Borders::ALL)
            .border_style(border_style);

        let body = if self.item.description.is_empty() {
            Text::from(Span::styled(
                "(no description)",
                Style::default().fg(Color::DarkGray).italic(),
            ))
        } else {
            Text::from(self.item.description.as_str())
        };

        frame.render_widget(
            Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn triggers_use_item_name() {
        let item = Item::new("bin 7/shelf", "odd");
        let card = ItemCard::new(&item);
        assert_eq!(card.edit_route(), Route::edit("bin 7/shelf"));
        assert_eq!(
            card.delete_request(),
            Request::DeleteItem("bin 7/shelf".into())
        );
    }

    #[test]
    fn renders_name_and_description() {
        let item = Item::new("widget", "blue");
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal
            .draw(|frame| ItemCard::new(&item).selected(true).render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("widget"));
        assert!(text.contains("blue"));
    }
}
