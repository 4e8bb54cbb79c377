use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListState, Paragraph};
use ticklist_core::{Screen, TaskId};

use crate::components::task_row::TaskRow;

/// The visible task list. Owns only the cursor; the tasks themselves
/// live in the [`Screen`] and are borrowed fresh for every render, so
/// the cursor is clamped against the current visible set on read.
pub struct TaskListView {
    list_state: ListState,
}

impl Default for TaskListView {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListView {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    /// Returns the id of the currently highlighted task among the
    /// visible ones, if any.
    pub fn selected_id(&self, screen: &Screen) -> Option<TaskId> {
        let visible = screen.visible();
        if visible.is_empty() {
            return None;
        }
        let idx = self
            .list_state
            .selected()
            .unwrap_or(0)
            .min(visible.len() - 1);
        Some(visible[idx].id)
    }

    pub fn handle_key(&mut self, key: KeyEvent, len: usize) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let current = self.list_state.selected().unwrap_or(0);
                if current + 1 < len {
                    self.list_state.select(Some(current + 1));
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let current = self
                    .list_state
                    .selected()
                    .unwrap_or(0)
                    .min(len.saturating_sub(1));
                if current > 0 {
                    self.list_state.select(Some(current - 1));
                }
            }
            // Jump to first/last
            KeyCode::Char('g') => {
                if len > 0 {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Char('G') => {
                if len > 0 {
                    self.list_state.select(Some(len - 1));
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, screen: &Screen, is_active: bool) {
        let visible = screen.visible();
        let title = format!(" Tasks ({}) ", visible.len());

        let border_style = if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        if visible.is_empty() && !screen.query().is_empty() {
            let text = format!("\nNo tasks match \"{}\"", screen.query());
            let paragraph = Paragraph::new(text)
                .block(block)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<_> = visible
            .iter()
            .map(|task| TaskRow::new(&task.text, screen.is_completed(task.id)).into_item())
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
            .highlight_symbol("> ");

        let mut state = self.clamped(visible.len());
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn clamped(&self, len: usize) -> ListState {
        let mut state = self.list_state.clone();
        if len == 0 {
            state.select(None);
        } else {
            state.select(Some(state.selected().unwrap_or(0).min(len - 1)));
        }
        state
    }
}
