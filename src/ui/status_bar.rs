use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    let selection = match state.selection {
        Some(r) if r.is_collapsed() => format!(" @{} ", r.start()),
        Some(r) => format!(" {}..{} ", r.start(), r.end()),
        None => " no selection ".to_string(),
    };
    parts.push(Span::styled(selection, Style::default().fg(Color::Green).bg(Color::DarkGray)));
    parts.push(Span::styled(format!(" {} ", state.status_line()), Theme::status_bar()));

    let mut right = if state.active.is_empty() {
        " - ".to_string()
    } else {
        format!(" {} ", state.active.join(" "))
    };
    if state.pending_custom > 0 {
        right = format!(" pending:{}{right}", state.pending_custom);
    }

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + right.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(right, Theme::status_active()));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
