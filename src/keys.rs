use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a single key press means at a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyInput {
    Text(String),
    Cancel,
    Ignore,
}

pub fn handle_key_event(key: KeyEvent) -> KeyInput {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => KeyInput::Cancel,
        KeyCode::Esc => KeyInput::Cancel,
        KeyCode::Enter => KeyInput::Text(String::new()),
        KeyCode::Char(c) if !ctrl => KeyInput::Text(c.to_string()),
        _ => KeyInput::Ignore,
    }
}
