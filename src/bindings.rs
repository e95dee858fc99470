//! Key bindings.
//!
//! The binding set is a static table from (modifiers, keysym) to an
//! [`Action`].  A binding matches a key press when the key symbols are equal
//! and every modifier the binding requires is held; additional held
//! modifiers are tolerated.  When more than one binding matches, the one
//! requiring the most modifiers wins, so `Super+Shift+q` quits rather than
//! closing a window.

use crate::event::{Keysym, Modifiers};
use crate::workspace::NUM_WORKSPACES;
use std::fmt;

/// Primary modifier for every binding ("super" / Mod4).
pub const PRIMARY: Modifiers = Modifiers::MOD4;

/// Key symbols used by the binding table (`XK_*` values).
pub mod keysym {
    use crate::event::Keysym;

    pub const RETURN: Keysym = 0xff0d;
    pub const TAB: Keysym = 0xff09;
    pub const Q: Keysym = 0x0071;
    pub const DIGIT_0: Keysym = 0x0030;
    pub const DIGIT_1: Keysym = 0x0031;
}

/// Everything a key binding can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Launch the configured terminal.
    SpawnTerminal,
    /// Close the window under the pointer.
    CloseFocused,
    /// Stop the window manager.
    Quit,
    /// Show workspace `i`.
    SwitchTo(usize),
    /// Go back to the previously shown workspace.
    ToggleLast,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SpawnTerminal => write!(f, "spawn-terminal"),
            Action::CloseFocused => write!(f, "close-focused"),
            Action::Quit => write!(f, "quit"),
            Action::SwitchTo(i) => write!(f, "switch-to {}", i),
            Action::ToggleLast => write!(f, "toggle-last"),
        }
    }
}

/// One row of the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub modifiers: Modifiers,
    pub keysym: Keysym,
    pub action: Action,
}

impl KeyBinding {
    pub const fn new(modifiers: Modifiers, keysym: Keysym, action: Action) -> Self {
        Self {
            modifiers,
            keysym,
            action,
        }
    }

    fn matches(&self, held: Modifiers, keysym: Keysym) -> bool {
        self.keysym == keysym && held.contains(self.modifiers)
    }
}

/// Key symbol that selects workspace `index`: `1`..`9` for the first nine,
/// `0` for the tenth.
fn workspace_keysym(index: usize) -> Keysym {
    if index == 9 {
        keysym::DIGIT_0
    } else {
        keysym::DIGIT_1 + index as Keysym
    }
}

/// The binding table.
#[derive(Debug, Clone)]
pub struct Bindings {
    table: Vec<KeyBinding>,
}

impl Default for Bindings {
    fn default() -> Self {
        let shift = PRIMARY | Modifiers::SHIFT;
        let mut table = vec![
            KeyBinding::new(PRIMARY, keysym::RETURN, Action::SpawnTerminal),
            KeyBinding::new(PRIMARY, keysym::Q, Action::CloseFocused),
            KeyBinding::new(shift, keysym::Q, Action::Quit),
            KeyBinding::new(PRIMARY, keysym::TAB, Action::ToggleLast),
        ];
        table.extend(
            (0..NUM_WORKSPACES)
                .map(|i| KeyBinding::new(PRIMARY, workspace_keysym(i), Action::SwitchTo(i))),
        );
        Self { table }
    }
}

impl Bindings {
    /// Resolve a key press to an action, if any binding matches.
    pub fn lookup(&self, held: Modifiers, keysym: Keysym) -> Option<Action> {
        self.table
            .iter()
            .filter(|b| b.matches(held, keysym))
            .max_by_key(|b| b.modifiers.count())
            .map(|b| b.action)
    }

    /// Every (modifiers, keysym) pair that has to be grabbed.
    pub fn grab_list(&self) -> impl Iterator<Item = (Modifiers, Keysym)> + '_ {
        self.table.iter().map(|b| (b.modifiers, b.keysym))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_return_spawns_terminal() {
        let b = Bindings::default();
        assert_eq!(
            b.lookup(PRIMARY, keysym::RETURN),
            Some(Action::SpawnTerminal)
        );
    }

    #[test]
    fn super_q_closes_and_super_shift_q_quits() {
        let b = Bindings::default();
        assert_eq!(b.lookup(PRIMARY, keysym::Q), Some(Action::CloseFocused));
        assert_eq!(
            b.lookup(PRIMARY | Modifiers::SHIFT, keysym::Q),
            Some(Action::Quit)
        );
    }

    #[test]
    fn digits_map_to_workspaces() {
        let b = Bindings::default();
        assert_eq!(b.lookup(PRIMARY, 0x31), Some(Action::SwitchTo(0)));
        assert_eq!(b.lookup(PRIMARY, 0x35), Some(Action::SwitchTo(4)));
        assert_eq!(b.lookup(PRIMARY, 0x39), Some(Action::SwitchTo(8)));
        assert_eq!(b.lookup(PRIMARY, 0x30), Some(Action::SwitchTo(9)));
    }

    #[test]
    fn super_tab_toggles() {
        let b = Bindings::default();
        assert_eq!(b.lookup(PRIMARY, keysym::TAB), Some(Action::ToggleLast));
    }

    #[test]
    fn extra_modifiers_are_tolerated() {
        let b = Bindings::default();
        let held = PRIMARY | Modifiers::MOD2 | Modifiers::LOCK;
        assert_eq!(b.lookup(held, keysym::RETURN), Some(Action::SpawnTerminal));
        let held = PRIMARY | Modifiers::CONTROL;
        assert_eq!(b.lookup(held, 0x32), Some(Action::SwitchTo(1)));
    }

    #[test]
    fn missing_primary_modifier_does_nothing() {
        let b = Bindings::default();
        assert_eq!(b.lookup(Modifiers::NONE, keysym::RETURN), None);
        assert_eq!(b.lookup(Modifiers::MOD1, keysym::Q), None);
        assert_eq!(b.lookup(Modifiers::SHIFT, keysym::Q), None);
    }

    #[test]
    fn unknown_keys_do_nothing() {
        let b = Bindings::default();
        assert_eq!(b.lookup(PRIMARY, 0x0061), None);
    }

    #[test]
    fn grab_list_covers_every_binding() {
        let b = Bindings::default();
        let grabs: Vec<_> = b.grab_list().collect();
        assert_eq!(grabs.len(), 4 + NUM_WORKSPACES);
        assert!(grabs.contains(&(PRIMARY | Modifiers::SHIFT, keysym::Q)));
        assert!(grabs.contains(&(PRIMARY, keysym::DIGIT_0)));
    }

    #[test]
    fn action_display() {
        assert_eq!(Action::SwitchTo(3).to_string(), "switch-to 3");
        assert_eq!(Action::Quit.to_string(), "quit");
    }
}
