//! **stackwm**: a minimal master-stack tiling window manager.
//!
//! Ten fixed workspaces hold independent lists of windows; only the current
//! one is visible.  The newest window on a workspace is the master and takes
//! the left half of the screen, the rest are stacked on the right.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::Session`] abstracts the windowing-system connection so the
//!   event loop and layout are not coupled to X11.
//! * [`traits::Spawner`] abstracts detached process launch.
//!
//! [`manager::Manager`] owns all state and drives the event loop.  Concrete
//! implementations live in [`x11`] (X11 via `x11rb`) and [`spawn`].

pub mod bindings;
pub mod close;
pub mod config;
pub mod event;
pub mod layout;
pub mod manager;
pub mod spawn;
pub mod traits;
pub mod workspace;
pub mod x11;
