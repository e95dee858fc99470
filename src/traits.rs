//! Core traits that decouple stackwm from any specific windowing system or
//! process launcher.
//!
//! Every concrete backend (X11, a test harness, …) implements one of these
//! traits.  The [`Manager`](crate::manager::Manager) only depends on these
//! abstractions.

use crate::event::{CloseProtocol, Event, Geometry, Keysym, Modifiers, ScreenSize, WindowId};

/// Abstraction over a windowing-system connection.
///
/// The session delivers input and window-lifecycle [`Event`]s and accepts
/// geometry, visibility and close commands.  Commands are fire-and-forget
/// against an asynchronous protocol: callers log failures and carry on.
pub trait Session {
    /// The error type produced by this session.
    type Error: std::error::Error + Send + 'static;

    /// Size of the (single) screen managed by this session.
    fn screen_size(&self) -> ScreenSize;

    /// Ask to receive key presses of `keysym` while `modifiers` are held.
    fn grab_key(&self, modifiers: Modifiers, keysym: Keysym) -> Result<(), Self::Error>;

    /// Block until the next event arrives.
    ///
    /// An error means the connection is unusable and the event loop must
    /// stop.
    fn next_event(&mut self) -> Result<Event, Self::Error>;

    /// Move and resize `window`.
    fn set_geometry(&self, window: WindowId, geometry: Geometry) -> Result<(), Self::Error>;

    /// Show or hide `window`.
    ///
    /// Hiding a window through this call must not surface as an
    /// [`Event::UnmapNotify`]; only unmaps initiated by the window's owner
    /// are reported.
    fn set_visible(&self, window: WindowId, visible: bool) -> Result<(), Self::Error>;

    /// The top-level window currently under the pointer, if any.
    fn pointer_target(&self) -> Result<Option<WindowId>, Self::Error>;

    /// The close-related protocols `window` advertises.
    fn close_protocols(&self, window: WindowId) -> Result<Vec<CloseProtocol>, Self::Error>;

    /// Deliver a graceful close request; the window is expected to unmap
    /// itself.
    fn send_close_request(&self, window: WindowId) -> Result<(), Self::Error>;

    /// Destroy `window` unconditionally.
    fn destroy(&self, window: WindowId) -> Result<(), Self::Error>;

    /// Flush pending requests and release the connection.
    fn close(&mut self) -> Result<(), Self::Error>;
}

/// Fire-and-forget process launcher.
///
/// Implementations must not wait for the child.  A child that fails to run
/// affects only itself; `Err` is returned only when the child could not be
/// started at all.
pub trait Spawner {
    fn spawn(&self, argv: &[String]) -> std::io::Result<()>;
}

