use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ticklist_core::{Screen, Submit, TaskId};

use crate::components::task_list::TaskListView;

/// What the app is currently doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal list navigation
    Normal,
    /// Typing into the input bar; an edit is in progress when the
    /// screen carries an edit marker
    Input,
    /// Typing into the search bar
    Search,
    /// "Save Task?" dialog for the task under edit
    ConfirmSave { id: TaskId },
    /// "Delete Task?" dialog
    ConfirmDelete { id: TaskId },
}

pub struct App {
    screen: Screen,
    list: TaskListView,
    mode: Mode,
    status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
            list: TaskListView::new(),
            mode: Mode::Normal,
            status_message: None,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Modes where a bare `q` must not quit the app: text entry
    /// captures the character, confirm dialogs treat it as "cancel".
    pub fn is_input_mode(&self) -> bool {
        !matches!(self.mode, Mode::Normal)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::Input => self.handle_input(key),
            Mode::Search => self.handle_search(key),
            Mode::ConfirmSave { id } => self.handle_confirm_save(key, id),
            Mode::ConfirmDelete { id } => self.handle_confirm_delete(key, id),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.mode = Mode::Input;
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.list.selected_id(&self.screen) {
                    if self.screen.begin_edit(id) {
                        self.mode = Mode::Input;
                    }
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('c') => {
                if let Some(id) = self.list.selected_id(&self.screen) {
                    self.screen.toggle_complete(id);
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.list.selected_id(&self.screen) {
                    self.mode = Mode::ConfirmDelete { id };
                }
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
            }
            _ => {
                let len = self.screen.visible().len();
                self.list.handle_key(key, len);
            }
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => match self.screen.submit() {
                Submit::Added(_) => {
                    self.status_message = Some("Task added".into());
                    self.mode = Mode::Normal;
                }
                Submit::Ignored => {}
                Submit::NeedsConfirm(id) => {
                    self.mode = Mode::ConfirmSave { id };
                }
            },
            KeyCode::Esc => {
                // Abandoning an edit clears the marker; the draft is
                // kept either way.
                if self.screen.editing().is_some() {
                    self.screen.cancel_edit();
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.screen.draft_pop();
            }
            KeyCode::Char(c) => {
                self.screen.draft_push(c);
            }
            _ => {}
        }
    }

    fn handle_search(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => {
                self.screen.clear_query();
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.screen.query_pop();
            }
            KeyCode::Char(c) => {
                self.screen.query_push(c);
            }
            _ => {}
        }
    }

    fn handle_confirm_save(&mut self, key: KeyEvent, _id: TaskId) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.screen.apply_edit();
                self.status_message = Some("Task saved".into());
                self.mode = Mode::Normal;
            }
            _ => {
                // Cancel clears the edit marker only; the draft stays
                // in the input bar for further typing.
                self.screen.cancel_edit();
                self.mode = Mode::Input;
            }
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyEvent, id: TaskId) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let text = self
                    .screen
                    .tasks()
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| t.text.clone())
                    .unwrap_or_default();
                self.screen.delete(id);
                self.status_message = Some(format!("Deleted: {text}"));
                self.mode = Mode::Normal;
            }
            _ => self.mode = Mode::Normal,
        }
    }

    // ---- Rendering ----

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);
        self.render_search_bar(frame, layout[1]);
        self.list.render(
            frame,
            layout[2],
            &self.screen,
            matches!(self.mode, Mode::Normal),
        );
        self.render_input_bar(frame, layout[3]);
        self.render_status_bar(frame, layout[4]);

        // Overlays
        match &self.mode {
            Mode::ConfirmSave { id } => self.render_confirm_save(frame, *id, area),
            Mode::ConfirmDelete { id } => self.render_confirm_delete(frame, *id, area),
            _ => {}
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let total = self.screen.tasks().len();
        let done = self.screen.completed_count();
        let mut spans = vec![
            Span::styled(" ticklist ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(format!("{total} tasks"), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" ({done} done)"),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.screen.query().is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("filter: {}", self.screen.query()),
                Style::default().fg(Color::Magenta),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_search_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = matches!(self.mode, Mode::Search);
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Search ");
        let paragraph = Paragraph::new(self.screen.query()).block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_input_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = matches!(self.mode, Mode::Input | Mode::ConfirmSave { .. });
        let title = if self.screen.editing().is_some() {
            " Edit task "
        } else {
            " New task "
        };
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        let paragraph = if self.screen.draft().is_empty() && !focused {
            Paragraph::new("Write a task")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
        } else {
            Paragraph::new(self.screen.draft()).block(block)
        };
        frame.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.status_message {
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(Color::Green),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = match &self.mode {
            Mode::Normal => vec![
                ("q", "quit"),
                ("j/k", "move"),
                ("a", "new"),
                ("e", "edit"),
                ("Space", "check"),
                ("d", "del"),
                ("/", "search"),
            ],
            Mode::Input => {
                if self.screen.editing().is_some() {
                    vec![("Enter", "save"), ("Esc", "cancel")]
                } else {
                    vec![("Enter", "add"), ("Esc", "back")]
                }
            }
            Mode::Search => vec![("Enter", "apply"), ("Esc", "clear")],
            Mode::ConfirmSave { .. } | Mode::ConfirmDelete { .. } => {
                vec![("y", "confirm"), ("any", "cancel")]
            }
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

    fn render_confirm_save(&self, frame: &mut Frame, id: TaskId, area: Rect) {
        let popup = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Save Task? ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let old = self
            .screen
            .tasks()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.text.as_str())
            .unwrap_or("");
        let text = format!(
            "Replace \"{old}\"\nwith \"{}\"?\n\n(y)es / (any key) cancel",
            self.screen.draft()
        );
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }

    fn render_confirm_delete(&self, frame: &mut Frame, id: TaskId, area: Rect) {
        let popup = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Delete Task? ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let text = self
            .screen
            .tasks()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.text.as_str())
            .unwrap_or("");
        let body = format!("Delete \"{text}\"?\n\n(y)es / (any key) cancel");
        let paragraph = Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, popup);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
