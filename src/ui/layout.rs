use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub toolbar: Rect,
    pub document: Rect,
    pub source: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Toolbar
            Constraint::Min(5),    // Document | source
            Constraint::Length(3), // Link prompt
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([Constraint::Percentage(55), Constraint::Min(20)])
        .split(rows[1]);

    AppLayout {
        toolbar: rows[0],
        document: columns[0],
        source: columns[1],
        input_box: rows[2],
        status_bar: rows[3],
    }
}
