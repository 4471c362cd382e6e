mod document_view;
mod input_box;
pub mod layout;
mod source_panel;
mod status_bar;
mod theme;
pub mod toolbar_bar;

use crate::app::state::AppState;
use inkbar::document::DocumentHost;
use inkbar::toolbar::Toolbar;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState, toolbar: &Toolbar<DocumentHost>) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    toolbar_bar::render(frame, app_layout.toolbar, state);
    document_view::render(frame, app_layout.document, state, toolbar.host().document());
    source_panel::render(frame, app_layout.source, toolbar);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state);
}
