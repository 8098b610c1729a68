use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::menu::MenuKey;

/// Translate a terminal event into a menu key.
///
/// Returns `None` for events the menu ignores (mouse, resize, key releases,
/// unbound keys).
pub fn map_event(event: &Event) -> Option<MenuKey> {
    match event {
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

pub fn map_key(key: &KeyEvent) -> Option<MenuKey> {
    // Windows reports both press and release
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(MenuKey::Interrupt),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(MenuKey::Up),
        KeyCode::Down => Some(MenuKey::Down),
        KeyCode::Enter => Some(MenuKey::Enter),
        KeyCode::Esc => Some(MenuKey::Escape),
        KeyCode::Backspace => Some(MenuKey::Backspace),
        KeyCode::Char(c) => Some(MenuKey::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_event(&create_key_event(KeyCode::Up)), Some(MenuKey::Up));
        assert_eq!(map_event(&create_key_event(KeyCode::Down)), Some(MenuKey::Down));
        assert_eq!(map_event(&create_key_event(KeyCode::Enter)), Some(MenuKey::Enter));
        assert_eq!(map_event(&create_key_event(KeyCode::Esc)), Some(MenuKey::Escape));
        assert_eq!(
            map_event(&create_key_event(KeyCode::Backspace)),
            Some(MenuKey::Backspace)
        );
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let event = create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_event(&event), Some(MenuKey::Interrupt));

        let event = create_key_event_with_modifiers(KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert_eq!(map_event(&event), None);
    }

    #[test]
    fn test_shifted_chars_pass_through() {
        let event = create_key_event_with_modifiers(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(map_event(&event), Some(MenuKey::Char('D')));
    }

    #[test]
    fn test_release_and_resize_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_event(&Event::Key(key)), None);
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
        assert_eq!(map_event(&create_key_event(KeyCode::Tab)), None);
    }
}
