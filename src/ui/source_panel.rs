use crate::ui::theme::Theme;
use inkbar::document::DocumentHost;
use inkbar::toolbar::Toolbar;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Serialized document and toolbar markup.
pub fn render(frame: &mut Frame, area: Rect, toolbar: &Toolbar<DocumentHost>) {
    let block = Block::default()
        .title(" HTML ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines = vec![
        Line::styled("document", Theme::hint()),
        Line::styled(toolbar.host().html(), Theme::source()),
        Line::default(),
        Line::styled("toolbar", Theme::hint()),
    ];
    match toolbar.render_html() {
        Some(html) => lines.push(Line::styled(html, Theme::source())),
        None => lines.push(Line::styled("(not built)", Theme::hint())),
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
