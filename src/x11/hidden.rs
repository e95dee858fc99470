//! Unmaps issued by the window manager itself.
//!
//! Hiding a workspace unmaps its windows, and the server reports each of
//! those unmaps back as an `UnmapNotify` exactly like one the client caused.
//! The two are told apart by sequence number: an event carries the sequence
//! number of the last request of ours the server had processed, so the
//! notify caused by our `UnmapWindow` carries that request's number, and a
//! client unmap processed before it carries a lower one.

use std::collections::HashMap;
use x11rb::protocol::xproto::Window;

/// Sequence numbers of our own pending `UnmapWindow` requests, per window.
#[derive(Debug, Default)]
pub struct HiddenWindows {
    pending: HashMap<Window, Vec<u64>>,
}

impl HiddenWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that we sent `UnmapWindow` for `window` as request `sequence`.
    pub fn hide(&mut self, window: Window, sequence: u64) {
        self.pending.entry(window).or_default().push(sequence);
    }

    /// Account for an `UnmapNotify` of `window` carrying `sequence`.
    ///
    /// Returns `true` when our own request caused it.  Requests older than
    /// `sequence` are dropped: events arrive in order, so a hide that has
    /// produced no notify by now was a no-op on an already unmapped window.
    pub fn take_own_unmap(&mut self, window: Window, sequence: u64) -> bool {
        let Some(seqs) = self.pending.get_mut(&window) else {
            return false;
        };
        let ours = seqs.contains(&sequence);
        seqs.retain(|&s| s > sequence);
        if seqs.is_empty() {
            self.pending.remove(&window);
        }
        ours
    }

    /// Drop everything known about `window` (it was destroyed).
    pub fn forget(&mut self, window: Window) {
        self.pending.remove(&window);
    }

    pub fn is_pending(&self, window: Window) -> bool {
        self.pending.contains_key(&window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Window = 0x40_0001;
    const B: Window = 0x40_0002;

    #[test]
    fn hide_then_notify_is_swallowed() {
        let mut hidden = HiddenWindows::new();
        hidden.hide(A, 10);
        assert!(hidden.take_own_unmap(A, 10));
        assert!(!hidden.is_pending(A));
    }

    #[test]
    fn later_client_unmap_is_reported() {
        let mut hidden = HiddenWindows::new();
        hidden.hide(A, 10);
        assert!(hidden.take_own_unmap(A, 10));
        // Shown again at 11, then the client unmaps itself.
        assert!(!hidden.take_own_unmap(A, 14));
    }

    #[test]
    fn repeated_hide_and_show_swallows_each_hide() {
        let mut hidden = HiddenWindows::new();
        // hide at 10, show at 11, hide at 12, all before any event is read.
        hidden.hide(A, 10);
        hidden.hide(A, 12);
        assert!(hidden.take_own_unmap(A, 10));
        assert!(hidden.is_pending(A));
        assert!(hidden.take_own_unmap(A, 12));
        assert!(!hidden.is_pending(A));
        assert!(!hidden.take_own_unmap(A, 20));
    }

    #[test]
    fn client_unmap_just_before_hide_is_reported() {
        let mut hidden = HiddenWindows::new();
        // The client's unmap was processed after our request 7, and our
        // hide (request 8) found the window already unmapped.
        hidden.hide(A, 8);
        assert!(!hidden.take_own_unmap(A, 7));
    }

    #[test]
    fn hide_of_unmapped_window_does_not_swallow_later_unmap() {
        let mut hidden = HiddenWindows::new();
        // No notify ever arrives for this hide.
        hidden.hide(A, 8);
        // Remapped at 30, unmapped by its client afterwards.
        assert!(!hidden.take_own_unmap(A, 31));
        assert!(!hidden.is_pending(A));
    }

    #[test]
    fn windows_are_tracked_independently() {
        let mut hidden = HiddenWindows::new();
        hidden.hide(A, 10);
        hidden.hide(B, 11);
        assert!(!hidden.take_own_unmap(B, 10));
        assert!(hidden.take_own_unmap(A, 10));
        assert!(hidden.take_own_unmap(B, 11));
    }

    #[test]
    fn forget_drops_pending_hides() {
        let mut hidden = HiddenWindows::new();
        hidden.hide(A, 10);
        hidden.forget(A);
        assert!(!hidden.is_pending(A));
        assert!(!hidden.take_own_unmap(A, 10));
    }
}
