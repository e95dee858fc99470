//! Graceful-or-forced window termination.

use crate::event::{CloseProtocol, WindowId};
use crate::traits::Session;
use log::{debug, info, warn};

/// What [`close_window`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A close request was delivered; the window decides what happens next.
    Requested,
    /// The window was destroyed outright.
    Destroyed,
}

/// Close `window`, politely if it supports `WM_DELETE_WINDOW`.
///
/// A window that ignores the request is left alone: there is no timeout and
/// no follow-up destroy.  The registry entry goes away only when the window
/// unmaps itself.  If the protocol list cannot be read, the window is
/// treated as not supporting graceful close.
pub fn close_window<S: Session>(session: &S, window: WindowId) -> CloseOutcome {
    let protocols = session.close_protocols(window).unwrap_or_else(|e| {
        warn!("could not read protocols of {}: {}", window, e);
        Vec::new()
    });

    if protocols.contains(&CloseProtocol::DeleteWindow) {
        info!("closing {} (WM_DELETE_WINDOW)", window);
        if let Err(e) = session.send_close_request(window) {
            warn!("close request to {} failed: {}", window, e);
        }
        CloseOutcome::Requested
    } else {
        info!("destroying {} (no WM_DELETE_WINDOW)", window);
        if let Err(e) = session.destroy(window) {
            warn!("destroy of {} failed: {}", window, e);
        }
        debug!("{} advertised {:?}", window, protocols);
        CloseOutcome::Destroyed
    }
}
