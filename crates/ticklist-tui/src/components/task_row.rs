use ratatui::prelude::*;
use ratatui::widgets::ListItem;

/// One task row: a checkbox cell followed by the task text, rendered
/// crossed-out and dimmed when the task is completed.
///
/// Pure rendering; the row owns no state. The selection highlight is
/// applied by the surrounding list.
pub struct TaskRow<'a> {
    text: &'a str,
    completed: bool,
}

impl<'a> TaskRow<'a> {
    pub fn new(text: &'a str, completed: bool) -> Self {
        Self { text, completed }
    }

    pub fn line(&self) -> Line<'a> {
        let checkbox = if self.completed { "[x] " } else { "[ ] " };
        let text_style = if self.completed {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(checkbox, Style::default().fg(Color::Cyan)),
            Span::styled(self.text, text_style),
        ])
    }

    pub fn into_item(self) -> ListItem<'a> {
        ListItem::new(self.line())
    }
}
