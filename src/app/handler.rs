use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::ui;
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        // Ticks are applied to the toolbar directly in the main loop.
        AppEvent::Tick => vec![],
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) => handle_key(state, key),
        CEvent::Mouse(mouse) => handle_mouse(state, mouse),
        CEvent::Resize(w, h) => {
            state.terminal_size = (w, h);
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }
    state.dirty = true;

    if state.in_prompt() {
        return handle_prompt_key(state, key);
    }
    handle_editor_key(state, key)
}

fn handle_prompt_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => {
            let url = state.input.take_text();
            vec![Action::SubmitLink { url }]
        }
        KeyCode::Esc => {
            state.input.clear();
            vec![Action::CancelLink]
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Delete => {
            state.input.delete_forward();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::Char(c) => {
            state.input.insert_char(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_editor_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![Action::SelectAll]
        }
        KeyCode::Left => vec![Action::MoveFocus { delta: -1, extend }],
        KeyCode::Right => vec![Action::MoveFocus { delta: 1, extend }],
        KeyCode::Home => vec![Action::MoveFocusTo { offset: 0, extend }],
        KeyCode::End => vec![Action::MoveFocusTo {
            offset: usize::MAX,
            extend,
        }],
        KeyCode::Tab => vec![Action::Blur],
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            activate_index(state, index)
        }
        _ => vec![],
    }
}

fn activate_index(state: &mut AppState, index: usize) -> Vec<Action> {
    match state.button_at(index) {
        Some(button) => vec![Action::Activate {
            name: button.name.clone(),
        }],
        None => {
            state.set_status(format!("No button {}", index + 1));
            vec![]
        }
    }
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> Vec<Action> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || state.in_prompt() {
        return vec![];
    }
    let (w, h) = state.terminal_size;
    let layout = ui::layout::compute_layout(Rect::new(0, 0, w, h));
    match ui::toolbar_bar::button_at(&state.buttons, layout.toolbar, mouse.column, mouse.row) {
        Some(index) => activate_index(state, index),
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ButtonView;
    use inkbar::config::AppConfig;

    fn state_with_buttons() -> AppState {
        let mut state = AppState::new(AppConfig::default());
        state.terminal_size = (100, 30);
        state.buttons = ["bold", "italic", "anchor"]
            .iter()
            .enumerate()
            .map(|(i, name)| ButtonView {
                name: name.to_string(),
                label: name.to_string(),
                active: false,
                first: i == 0,
                last: i == 2,
            })
            .collect();
        state
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, modifiers)))
    }

    #[test]
    fn test_arrows_move_and_extend() {
        let mut state = state_with_buttons();
        assert_eq!(
            handle_event(&mut state, key(KeyCode::Right, KeyModifiers::NONE)),
            vec![Action::MoveFocus {
                delta: 1,
                extend: false
            }]
        );
        assert_eq!(
            handle_event(&mut state, key(KeyCode::Left, KeyModifiers::SHIFT)),
            vec![Action::MoveFocus {
                delta: -1,
                extend: true
            }]
        );
        assert_eq!(
            handle_event(&mut state, key(KeyCode::End, KeyModifiers::SHIFT)),
            vec![Action::MoveFocusTo {
                offset: usize::MAX,
                extend: true
            }]
        );
    }

    #[test]
    fn test_digit_activates_button() {
        let mut state = state_with_buttons();
        assert_eq!(
            handle_event(&mut state, key(KeyCode::Char('2'), KeyModifiers::NONE)),
            vec![Action::Activate {
                name: "italic".into()
            }]
        );
        assert!(handle_event(&mut state, key(KeyCode::Char('9'), KeyModifiers::NONE)).is_empty());
        assert_eq!(state.status_message.as_deref(), Some("No button 9"));
    }

    #[test]
    fn test_prompt_mode_captures_keys() {
        let mut state = state_with_buttons();
        state.prompt = Some(inkbar::toolbar::TextRange::new(0, 3));
        for c in "x.io".chars() {
            assert!(handle_event(&mut state, key(KeyCode::Char(c), KeyModifiers::NONE)).is_empty());
        }
        assert!(handle_event(&mut state, key(KeyCode::Char('q'), KeyModifiers::NONE)).is_empty());
        handle_event(&mut state, key(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(
            handle_event(&mut state, key(KeyCode::Enter, KeyModifiers::NONE)),
            vec![Action::SubmitLink { url: "x.io".into() }]
        );
        assert_eq!(
            handle_event(&mut state, key(KeyCode::Esc, KeyModifiers::NONE)),
            vec![Action::CancelLink]
        );
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state_with_buttons();
        assert_eq!(
            handle_event(&mut state, key(KeyCode::Char('q'), KeyModifiers::NONE)),
            vec![Action::Quit]
        );
        state.prompt = Some(inkbar::toolbar::TextRange::new(0, 3));
        assert_eq!(
            handle_event(&mut state, key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![Action::Quit]
        );
    }

    #[test]
    fn test_click_on_toolbar_button() {
        let mut state = state_with_buttons();
        let (w, h) = state.terminal_size;
        let layout = ui::layout::compute_layout(Rect::new(0, 0, w, h));
        let spans = ui::toolbar_bar::button_spans(&state.buttons, layout.toolbar);
        let (x, _) = spans[2];
        let click = AppEvent::Terminal(CEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: layout.toolbar.y,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(
            handle_event(&mut state, click),
            vec![Action::Activate {
                name: "anchor".into()
            }]
        );
    }

    #[test]
    fn test_resize_updates_size() {
        let mut state = state_with_buttons();
        handle_event(&mut state, AppEvent::Terminal(CEvent::Resize(120, 40)));
        assert_eq!(state.terminal_size, (120, 40));
    }
}
