use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Cyan;

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn button() -> Style {
        Style::default().fg(Color::White).bg(Color::Black)
    }

    pub fn button_active() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_edge() -> Style {
        Style::default().fg(Self::ACCENT).bg(Color::Black)
    }

    pub fn block_label() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn heading() -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub fn quote() -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)
    }

    pub fn preformatted() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn link() -> Style {
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn selection() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn prompt_range() -> Style {
        Style::default().bg(Color::Yellow).fg(Color::Black)
    }

    pub fn source() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn status_active() -> Style {
        Style::default().fg(Self::ACCENT).bg(Color::DarkGray)
    }
}
