//! Events and types used throughout stackwm.
//!
//! This module defines the vocabulary that all components share:
//! [`Event`] describes everything a [`Session`](crate::traits::Session) can
//! deliver, and [`WindowId`] / [`Geometry`] / [`ScreenSize`] /
//! [`CloseProtocol`] provide the supporting data types.

use std::fmt;

/// Opaque handle of a top-level window, as issued by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Set of held modifier keys, using the X11 modifier bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    pub const LOCK: Modifiers = Modifiers(1 << 1);
    pub const CONTROL: Modifiers = Modifiers(1 << 2);
    pub const MOD1: Modifiers = Modifiers(1 << 3);
    pub const MOD2: Modifiers = Modifiers(1 << 4);
    pub const MOD4: Modifiers = Modifiers(1 << 6);

    /// Whether every bit of `other` is also set in `self`.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Number of modifier bits set.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// An X11 key symbol (`XK_*` value).
pub type Keysym = u32;

/// Window-protocol capabilities a window may advertise (`WM_PROTOCOLS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseProtocol {
    /// `WM_DELETE_WINDOW`: the window accepts a graceful close request.
    DeleteWindow,
    /// `WM_TAKE_FOCUS`.
    TakeFocus,
    /// Any other advertised protocol, by atom value.
    Other(u32),
}

/// Everything the session can deliver to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A grabbed key combination was pressed.
    KeyPress {
        modifiers: Modifiers,
        keysym: Keysym,
        keycode: u8,
    },

    /// A top-level window asks to be shown.
    MapRequest(WindowId),

    /// A window was unmapped by its owner.
    UnmapNotify(WindowId),

    /// A window was destroyed.
    DestroyNotify(WindowId),

    /// Anything the manager does not act upon.
    Other,
}

/// Size of the screen in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

/// Position and size assigned to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
