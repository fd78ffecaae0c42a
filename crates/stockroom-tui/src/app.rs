use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use stockroom_service::ItemService;
use tracing::debug;

use crate::dispatch::{Completion, Dispatcher, ViewToken};
use crate::route::Route;
use crate::views::{EditPhase, EditView, Effect, HomeView};

/// The one mounted view.
pub enum Screen {
    Home(HomeView),
    Edit(EditView),
}

pub struct App {
    dispatcher: Dispatcher,
    screen: Screen,
    route: Route,
    token: ViewToken,
    next_token: u64,
}

impl App {
    pub fn new(service: Arc<dyn ItemService>, route: Route) -> io::Result<Self> {
        let mut app = Self {
            dispatcher: Dispatcher::new(service)?,
            screen: Screen::Home(HomeView::new()),
            route: Route::Home,
            token: ViewToken(0),
            next_token: 1,
        };
        app.navigate(route);
        Ok(app)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn home(&self) -> Option<&HomeView> {
        match &self.screen {
            Screen::Home(view) => Some(view),
            Screen::Edit(_) => None,
        }
    }

    pub fn edit(&self) -> Option<&EditView> {
        match &self.screen {
            Screen::Edit(view) => Some(view),
            Screen::Home(_) => None,
        }
    }

    /// Unmount the current view and mount the one for `route`.
    pub fn navigate(&mut self, route: Route) {
        debug!(from = %self.route, to = %route, "navigating");
        self.token = ViewToken(self.next_token);
        self.next_token += 1;

        let (screen, effects) = match &route {
            Route::Home => {
                let mut view = HomeView::new();
                let effects = view.mount();
                (Screen::Home(view), effects)
            }
            Route::Edit { name } => {
                let mut view = EditView::new(name.as_str());
                let effects = view.mount();
                (Screen::Edit(view), effects)
            }
        };
        self.screen = screen;
        self.route = route;
        self.run(effects);
    }

    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Request(request) => self.dispatcher.send(self.token, request),
                Effect::Navigate(route) => {
                    self.navigate(route);
                    // Anything after a navigation belonged to the old view.
                    return;
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let effects = match &mut self.screen {
            Screen::Home(view) => view.handle_key(key),
            Screen::Edit(view) => view.handle_key(key),
        };
        self.run(effects);
    }

    /// True when typed characters belong to a form rather than to shortcuts.
    pub fn is_input_mode(&self) -> bool {
        match &self.screen {
            Screen::Home(view) => view.is_input_mode(),
            Screen::Edit(view) => view.is_input_mode(),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.dispatcher.in_flight() > 0
    }

    /// Apply every response that has already arrived.
    pub fn pump(&mut self) {
        while let Some(completion) = self.dispatcher.try_recv() {
            self.deliver(completion);
        }
    }

    /// Block until no request is in flight or `timeout` elapses. Returns
    /// whether everything settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.has_pending() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            if let Some(completion) = self.dispatcher.recv_timeout(remaining) {
                self.deliver(completion);
            }
        }
        true
    }

    fn deliver(&mut self, completion: Completion) {
        if completion.token != self.token {
            debug!(
                token = ?completion.token,
                current = ?self.token,
                "dropping response for unmounted view"
            );
            return;
        }
        let effects = match &mut self.screen {
            Screen::Home(view) => view.apply(completion.response),
            Screen::Edit(view) => view.apply(completion.response),
        };
        self.run(effects);
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        match &self.screen {
            Screen::Home(view) => view.render(frame, layout[1]),
            Screen::Edit(view) => view.render(frame, layout[1]),
        }
        self.render_status_bar(frame, layout[2]);
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" stockroom ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(self.route.path(), Style::default().fg(Color::Yellow)),
        ];
        if self.has_pending() {
            spans.push(Span::styled(" *", Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = match &self.screen {
            Screen::Home(view) if view.is_input_mode() => vec![
                ("Tab", "next field"),
                ("Ctrl+S", "create"),
                ("Esc", "cancel"),
            ],
            Screen::Home(_) => vec![
                ("q", "quit"),
                ("hjkl", "move"),
                ("a", "add"),
                ("Enter/e", "edit"),
                ("d", "del"),
                ("r", "refresh"),
            ],
            Screen::Edit(view) => match view.phase() {
                EditPhase::Ready { .. } => vec![("Ctrl+S", "save"), ("Esc", "back")],
                EditPhase::Loading | EditPhase::Failed(_) => {
                    vec![("Esc", "back"), ("q", "quit")]
                }
            },
        };

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(
                        format!(" {key}"),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }
}
