//! Input model: events, semantic actions, and the keymap.
//!
//! Key events resolve to semantic [`KeyAction`] values through a configurable
//! [`Keymap`]; each view interprets the action in context (`Down` moves the
//! list cursor, scrolls a document, or advances the policy selection). Text
//! entry states (filter and search input) consume raw characters directly and
//! only consult the keymap for dismiss/confirm.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

// ─── Input Event Abstraction ────────────────────────────────────────────────

/// High-level input event consumed by the reducer and its views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press with modifiers.
    Key(KeyCode, KeyModifiers),
    /// Terminal resize.
    Resize(u16, u16),
}

// ─── Semantic Key Actions ───────────────────────────────────────────────────

/// Semantic action resolved from key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Quit (contextual: quits from the list, dismisses from the detail).
    Quit,
    /// Move cursor / scroll up.
    Up,
    /// Move cursor / scroll down.
    Down,
    /// Jump to the first item / top of document.
    First,
    /// Jump to the last item / bottom of document.
    Last,
    /// Cycle to the next tab.
    NextTab,
    /// Cycle to the previous tab.
    PrevTab,
    /// Confirm / select / open.
    Activate,
    /// Dismiss the innermost layer (escape).
    Dismiss,
    /// Enter incremental search / filter input.
    StartSearch,
    /// Jump to the next search match.
    NextMatch,
    /// Jump to the previous search match.
    PrevMatch,
}

// ─── Keymap ─────────────────────────────────────────────────────────────────

/// Configurable keymap resolving key events to semantic actions.
pub struct Keymap {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl Keymap {
    /// Create a keymap with the default bindings (vim-style movement plus
    /// arrow keys).
    #[must_use]
    pub fn default_bindings() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert((KeyCode::Char('q'), KeyModifiers::NONE), KeyAction::Quit);
        bindings.insert((KeyCode::Char('c'), KeyModifiers::CONTROL), KeyAction::Quit);

        bindings.insert((KeyCode::Up, KeyModifiers::NONE), KeyAction::Up);
        bindings.insert((KeyCode::Down, KeyModifiers::NONE), KeyAction::Down);
        bindings.insert((KeyCode::Char('k'), KeyModifiers::NONE), KeyAction::Up);
        bindings.insert((KeyCode::Char('j'), KeyModifiers::NONE), KeyAction::Down);

        bindings.insert((KeyCode::Char('g'), KeyModifiers::NONE), KeyAction::First);
        bindings.insert((KeyCode::Char('G'), KeyModifiers::NONE), KeyAction::Last);
        bindings.insert((KeyCode::Char('G'), KeyModifiers::SHIFT), KeyAction::Last);
        bindings.insert((KeyCode::Home, KeyModifiers::NONE), KeyAction::First);
        bindings.insert((KeyCode::End, KeyModifiers::NONE), KeyAction::Last);

        bindings.insert((KeyCode::Tab, KeyModifiers::NONE), KeyAction::NextTab);
        bindings.insert((KeyCode::Char('l'), KeyModifiers::NONE), KeyAction::NextTab);
        bindings.insert((KeyCode::BackTab, KeyModifiers::SHIFT), KeyAction::PrevTab);
        bindings.insert((KeyCode::BackTab, KeyModifiers::NONE), KeyAction::PrevTab);
        bindings.insert((KeyCode::Char('h'), KeyModifiers::NONE), KeyAction::PrevTab);

        bindings.insert((KeyCode::Enter, KeyModifiers::NONE), KeyAction::Activate);
        bindings.insert((KeyCode::Esc, KeyModifiers::NONE), KeyAction::Dismiss);

        bindings.insert(
            (KeyCode::Char('/'), KeyModifiers::NONE),
            KeyAction::StartSearch,
        );
        bindings.insert(
            (KeyCode::Char('n'), KeyModifiers::NONE),
            KeyAction::NextMatch,
        );
        bindings.insert(
            (KeyCode::Char('N'), KeyModifiers::NONE),
            KeyAction::PrevMatch,
        );
        bindings.insert(
            (KeyCode::Char('N'), KeyModifiers::SHIFT),
            KeyAction::PrevMatch,
        );

        Self { bindings }
    }

    /// Resolve a key event to a semantic action.
    #[must_use]
    pub fn resolve(&self, key: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
        self.bindings.get(&(key, modifiers)).copied()
    }

    /// Add or override a binding.
    pub fn bind(&mut self, key: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a binding.
    pub fn unbind(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        self.bindings.remove(&(key, modifiers));
    }

    /// Number of active bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the keymap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::default_bindings()
    }
}

/// Whether a key event is plain printable input (no control-style modifiers).
///
/// Used by text-entry states to decide whether a character goes into the
/// query buffer.
#[must_use]
pub fn is_plain_char(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(
        KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER | KeyModifiers::META,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keymap_has_bindings() {
        let keymap = Keymap::default_bindings();
        assert!(!keymap.is_empty());
        assert!(keymap.len() > 15);
    }

    #[test]
    fn resolve_vim_movement() {
        let keymap = Keymap::default_bindings();
        assert_eq!(
            keymap.resolve(KeyCode::Char('j'), KeyModifiers::NONE),
            Some(KeyAction::Down)
        );
        assert_eq!(
            keymap.resolve(KeyCode::Char('k'), KeyModifiers::NONE),
            Some(KeyAction::Up)
        );
    }

    #[test]
    fn resolve_quit_variants() {
        let keymap = Keymap::default_bindings();
        assert_eq!(
            keymap.resolve(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            keymap.resolve(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn shifted_match_navigation_resolves_either_way() {
        let keymap = Keymap::default_bindings();
        assert_eq!(
            keymap.resolve(KeyCode::Char('N'), KeyModifiers::SHIFT),
            Some(KeyAction::PrevMatch)
        );
        assert_eq!(
            keymap.resolve(KeyCode::Char('N'), KeyModifiers::NONE),
            Some(KeyAction::PrevMatch)
        );
    }

    #[test]
    fn resolve_unknown_returns_none() {
        let keymap = Keymap::default_bindings();
        assert!(
            keymap
                .resolve(KeyCode::Char('z'), KeyModifiers::NONE)
                .is_none()
        );
    }

    #[test]
    fn rebinding_overrides() {
        let mut keymap = Keymap::default_bindings();
        keymap.bind(KeyCode::Char('x'), KeyModifiers::NONE, KeyAction::Quit);
        assert_eq!(
            keymap.resolve(KeyCode::Char('x'), KeyModifiers::NONE),
            Some(KeyAction::Quit)
        );
        keymap.unbind(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(
            keymap
                .resolve(KeyCode::Char('x'), KeyModifiers::NONE)
                .is_none()
        );
    }

    #[test]
    fn plain_char_detection() {
        assert!(is_plain_char(KeyModifiers::NONE));
        assert!(is_plain_char(KeyModifiers::SHIFT));
        assert!(!is_plain_char(KeyModifiers::CONTROL));
        assert!(!is_plain_char(KeyModifiers::ALT));
    }
}
