//! Keycode ↔ keysym translation from the server's keyboard mapping.

use crate::event::Keysym;
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::{ConnectionExt as _, Keycode};

/// Snapshot of the keyboard mapping.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    min_keycode: Keycode,
    keysyms_per_keycode: usize,
    keysyms: Vec<Keysym>,
}

impl Keymap {
    /// Fetch the current mapping from the server.
    pub fn load<C: Connection>(conn: &C) -> Result<Self, ReplyError> {
        let setup = conn.setup();
        let min = setup.min_keycode;
        let max = setup.max_keycode;
        let reply = conn.get_keyboard_mapping(min, max - min + 1)?.reply()?;
        Ok(Self::from_raw(
            min,
            reply.keysyms_per_keycode as usize,
            reply.keysyms,
        ))
    }

    pub fn from_raw(
        min_keycode: Keycode,
        keysyms_per_keycode: usize,
        keysyms: Vec<Keysym>,
    ) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode,
            keysyms,
        }
    }

    /// Unshifted (level 0) keysym of `keycode`, or 0 if unmapped.
    pub fn keysym(&self, keycode: Keycode) -> Keysym {
        if keycode < self.min_keycode || self.keysyms_per_keycode == 0 {
            return 0;
        }
        let idx = (keycode - self.min_keycode) as usize * self.keysyms_per_keycode;
        self.keysyms.get(idx).copied().unwrap_or(0)
    }

    /// First keycode producing `keysym` at any level.
    pub fn keycode(&self, keysym: Keysym) -> Option<Keycode> {
        if keysym == 0 || self.keysyms_per_keycode == 0 {
            return None;
        }
        self.keysyms
            .chunks(self.keysyms_per_keycode)
            .position(|chunk| chunk.contains(&keysym))
            .and_then(|i| Keycode::try_from(self.min_keycode as usize + i).ok())
    }
}
