//! Input event types wrapping crossterm for decoupling.
//!
//! Crossterm events are converted via `From` impls so the document never
//! depends on crossterm directly.

use std::ops::BitOr;

use crossterm::event as ct;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    /// Any key without a dedicated variant.
    Other,
}

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// `q`, Escape, or Ctrl-C.
    pub fn is_quit(&self) -> bool {
        match self.code {
            Key::Char('c') => self.modifiers.contains(Modifiers::CTRL),
            Key::Char('q') | Key::Escape => true,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    Scroll,
}

/// A mouse event with action and cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// A left-button press at `(x, y)`.
    pub fn left_press(x: u16, y: u16) -> Self {
        Self {
            kind: MouseAction::Down(MouseBtn::Left),
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Whether this is a left-button press.
    pub fn is_left_press(&self) -> bool {
        self.kind == MouseAction::Down(MouseBtn::Left)
    }
}

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: ct::KeyModifiers) -> Modifiers {
    [
        (ct::KeyModifiers::SHIFT, Modifiers::SHIFT),
        (ct::KeyModifiers::CONTROL, Modifiers::CTRL),
        (ct::KeyModifiers::ALT, Modifiers::ALT),
    ]
    .into_iter()
    .filter(|(flag, _)| m.contains(*flag))
    .fold(Modifiers::NONE, |acc, (_, ours)| acc | ours)
}

fn convert_mouse_button(b: ct::MouseButton) -> MouseBtn {
    match b {
        ct::MouseButton::Left => MouseBtn::Left,
        ct::MouseButton::Right => MouseBtn::Right,
        ct::MouseButton::Middle => MouseBtn::Middle,
    }
}

impl From<ct::KeyEvent> for KeyEvent {
    fn from(event: ct::KeyEvent) -> Self {
        let code = match event.code {
            ct::KeyCode::Char(c) => Key::Char(c),
            ct::KeyCode::Enter => Key::Enter,
            ct::KeyCode::Esc => Key::Escape,
            ct::KeyCode::Tab => Key::Tab,
            ct::KeyCode::Backspace => Key::Backspace,
            ct::KeyCode::Left => Key::Left,
            ct::KeyCode::Right => Key::Right,
            ct::KeyCode::Up => Key::Up,
            ct::KeyCode::Down => Key::Down,
            _ => Key::Other,
        };
        KeyEvent::new(code, convert_modifiers(event.modifiers))
    }
}

impl From<ct::MouseEvent> for MouseEvent {
    fn from(event: ct::MouseEvent) -> Self {
        let kind = match event.kind {
            ct::MouseEventKind::Down(b) => MouseAction::Down(convert_mouse_button(b)),
            ct::MouseEventKind::Up(b) => MouseAction::Up(convert_mouse_button(b)),
            ct::MouseEventKind::Drag(b) => MouseAction::Drag(convert_mouse_button(b)),
            ct::MouseEventKind::Moved => MouseAction::Moved,
            _ => MouseAction::Scroll,
        };
        MouseEvent {
            kind,
            x: event.column,
            y: event.row,
            modifiers: convert_modifiers(event.modifiers),
        }
    }
}

/// Convert a crossterm `Event`, or `None` for events the document ignores
/// (focus changes, paste).
pub fn from_crossterm(event: ct::Event) -> Option<InputEvent> {
    match event {
        ct::Event::Key(key) if key.kind != ct::KeyEventKind::Release => {
            Some(InputEvent::Key(key.into()))
        }
        ct::Event::Mouse(mouse) => Some(InputEvent::Mouse(mouse.into())),
        ct::Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::ALT;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn quit_keys() {
        assert!(KeyEvent::new(Key::Char('q'), Modifiers::NONE).is_quit());
        assert!(KeyEvent::new(Key::Escape, Modifiers::NONE).is_quit());
        assert!(KeyEvent::new(Key::Char('c'), Modifiers::CTRL).is_quit());
        assert!(!KeyEvent::new(Key::Char('c'), Modifiers::NONE).is_quit());
        assert!(!KeyEvent::new(Key::Enter, Modifiers::NONE).is_quit());
    }

    #[test]
    fn from_crossterm_key() {
        let event = ct::KeyEvent::new(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL);
        let key = KeyEvent::from(event);
        assert_eq!(key.code, Key::Char('c'));
        assert!(key.modifiers.contains(Modifiers::CTRL));

        let f5 = KeyEvent::from(ct::KeyEvent::new(ct::KeyCode::F(5), ct::KeyModifiers::NONE));
        assert_eq!(f5.code, Key::Other);
    }

    #[test]
    fn from_crossterm_mouse_press() {
        let event = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 6,
            row: 0,
            modifiers: ct::KeyModifiers::NONE,
        });
        assert_eq!(
            from_crossterm(event),
            Some(InputEvent::Mouse(MouseEvent::left_press(6, 0)))
        );
    }

    #[test]
    fn from_crossterm_resize_and_ignored() {
        assert_eq!(
            from_crossterm(ct::Event::Resize(100, 40)),
            Some(InputEvent::Resize {
                width: 100,
                height: 40
            })
        );
        assert_eq!(from_crossterm(ct::Event::FocusGained), None);
        assert_eq!(from_crossterm(ct::Event::Paste("x".into())), None);
    }

    #[test]
    fn left_press_helpers() {
        assert!(MouseEvent::left_press(1, 2).is_left_press());
        let release = MouseEvent {
            kind: MouseAction::Up(MouseBtn::Left),
            ..MouseEvent::left_press(1, 2)
        };
        assert!(!release.is_left_press());
    }
}
