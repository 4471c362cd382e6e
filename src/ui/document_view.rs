//! Styled rendering of the document with the selection painted in.

use crate::app::state::AppState;
use crate::ui::theme::Theme;
use inkbar::document::{Document, NodeId};
use inkbar::toolbar::TextRange;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const CARET_AT_END: &str = "▏";

fn block_style(tag: Option<&str>) -> Style {
    match tag {
        Some("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => Theme::heading(),
        Some("blockquote") => Theme::quote(),
        Some("pre") => Theme::preformatted(),
        _ => Theme::text(),
    }
}

fn inline_style(mut style: Style, tags: &[&str]) -> Style {
    for tag in tags {
        style = match *tag {
            "b" | "strong" => style.add_modifier(Modifier::BOLD),
            "i" | "em" => style.add_modifier(Modifier::ITALIC),
            "u" => style.add_modifier(Modifier::UNDERLINED),
            "strike" | "s" | "del" => style.add_modifier(Modifier::CROSSED_OUT),
            "sup" | "sub" => style.add_modifier(Modifier::DIM),
            "a" => style.patch(Theme::link()),
            _ => style,
        };
    }
    style
}

fn push_char(spans: &mut Vec<Span<'static>>, c: char, style: Style) {
    match spans.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push(c),
        _ => spans.push(Span::styled(c.to_string(), style)),
    }
}

/// One line per block, each prefixed with its tag.
pub fn document_lines(
    doc: &Document,
    selection: Option<TextRange>,
    prompt: Option<TextRange>,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current: Option<Option<NodeId>> = None;

    let in_range = |r: Option<TextRange>, pos: usize| {
        r.is_some_and(|r| {
            if r.is_collapsed() {
                r.start() == pos
            } else {
                pos >= r.start() && pos < r.end()
            }
        })
    };

    for run in doc.text_runs() {
        if current != Some(run.block) {
            if current.is_some() {
                lines.push(Line::from(std::mem::take(&mut spans)));
            }
            let label = run.block.and_then(|b| doc.tag(b)).unwrap_or("·");
            spans.push(Span::styled(format!("{label:>10} │ "), Theme::block_label()));
            current = Some(run.block);
        }
        let base = inline_style(block_style(run.block.and_then(|b| doc.tag(b))), &run.tags);
        for (offset, c) in run.text.chars().enumerate() {
            let pos = run.start + offset;
            let mut style = base;
            if in_range(prompt, pos) {
                style = style.patch(Theme::prompt_range());
            }
            if in_range(selection, pos) {
                style = style.patch(Theme::selection());
            }
            push_char(&mut spans, if c == '\n' { ' ' } else { c }, style);
        }
    }

    if selection.is_some_and(|r| r.is_collapsed() && r.start() >= doc.text_len()) {
        spans.push(Span::styled(CARET_AT_END, Theme::border_focused()));
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, doc: &Document) {
    let focused = state.selection.is_some() && !state.in_prompt();
    let block = Block::default()
        .title(" Document ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let lines = document_lines(doc, state.selection, state.prompt);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_one_line_per_block() {
        let doc = Document::parse("<h3>title</h3><p>lorem <b>ipsum</b></p>").unwrap();
        let lines = document_lines(&doc, None, None);
        assert_eq!(lines.len(), 2);
        assert_eq!(text_of(&lines[0]), format!("{:>10} │ title", "h3"));
        assert_eq!(text_of(&lines[1]), format!("{:>10} │ lorem ipsum", "p"));
        let bold = lines[1].spans.last().unwrap();
        assert_eq!(bold.content, "ipsum");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_selection_is_reversed() {
        let doc = Document::parse("<p>lorem</p>").unwrap();
        let lines = document_lines(&doc, Some(TextRange::new(4, 1)), None);
        let selected: Vec<_> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::REVERSED))
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(selected, vec!["ore"]);
    }

    #[test]
    fn test_caret_at_end() {
        let doc = Document::parse("<p>ab</p>").unwrap();
        let lines = document_lines(&doc, Some(TextRange::caret(2)), None);
        assert!(text_of(&lines[0]).ends_with(CARET_AT_END));
    }
}
