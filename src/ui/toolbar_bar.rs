//! The button row.

use crate::app::state::{AppState, ButtonView};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const LEFT_MARGIN: u16 = 1;
const GAP: u16 = 1;

fn button_text(index: usize, button: &ButtonView) -> String {
    let left = if button.first { "[" } else { " " };
    let right = if button.last { "]" } else { " " };
    format!("{left}{}:{}{right}", index + 1, button.label)
}

/// Screen column and width of each button, in toolbar order.
pub fn button_spans(buttons: &[ButtonView], area: Rect) -> Vec<(u16, u16)> {
    let mut x = area.x + LEFT_MARGIN;
    buttons
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let width = button_text(i, b).width() as u16;
            let span = (x, width);
            x = x.saturating_add(width + GAP);
            span
        })
        .collect()
}

/// Index of the button under a screen cell.
pub fn button_at(buttons: &[ButtonView], area: Rect, column: u16, row: u16) -> Option<usize> {
    if row != area.y || column >= area.right() {
        return None;
    }
    button_spans(buttons, area)
        .iter()
        .position(|&(x, width)| column >= x && column < x + width)
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::raw(" ".repeat(LEFT_MARGIN as usize))];
    for (i, button) in state.buttons.iter().enumerate() {
        let style = if button.active {
            Theme::button_active()
        } else {
            Theme::button()
        };
        let text = button_text(i, button);
        if button.first || button.last {
            // Caps are drawn in the edge color; the body keeps the state color.
            let (head, rest) = text.split_at(1);
            let (body, tail) = rest.split_at(rest.len() - 1);
            spans.push(Span::styled(head.to_string(), if button.first { Theme::button_edge() } else { style }));
            spans.push(Span::styled(body.to_string(), style));
            spans.push(Span::styled(tail.to_string(), if button.last { Theme::button_edge() } else { style }));
        } else {
            spans.push(Span::styled(text, style));
        }
        spans.push(Span::raw(" ".repeat(GAP as usize)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
