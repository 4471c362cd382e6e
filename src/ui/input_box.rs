use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

const CHEVRON: &str = "❯ ";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.in_prompt();
    let title = match state.prompt {
        Some(range) => format!(" Link URL for {}..{} ", range.start(), range.end()),
        None => " Link ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !focused {
        let hint = Paragraph::new("select text and press the link button").style(Theme::hint());
        frame.render_widget(hint, inner);
        return;
    }

    let line = Line::from(vec![
        Span::styled(CHEVRON, Style::default().fg(Theme::ACCENT)),
        Span::styled(state.input.text.as_str(), Theme::input_text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    let cursor_x = inner.x + 2 + state.input.cursor_column() as u16;
    frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
}
