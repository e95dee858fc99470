//! X11-specific implementations.
//!
//! This module provides the concrete [`Session`](crate::traits::Session)
//! backend, built on `x11rb`.
//!
//! Nothing outside this module should reference X11 directly.

pub mod hidden;
pub mod keymap;
pub mod session;

pub use session::{X11Error, X11Session};
