//! Client registry.
//!
//! [`Workspaces`] holds a fixed number of [`Workspace`]s, each an ordered
//! list of managed windows.  The front of a list is the most recently added
//! window, which the layout treats as the master.
//!
//! A window handle lives in at most one workspace at a time;
//! [`Workspaces::add`] refuses handles that are already managed.

use crate::event::WindowId;
use std::collections::VecDeque;

/// Number of workspaces, fixed for the lifetime of the process.
pub const NUM_WORKSPACES: usize = 10;

/// One virtual desktop: an ordered list of client windows.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    clients: VecDeque<WindowId>,
    /// Membership changed while hidden; the stored geometry is out of date.
    stale: bool,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `window` at the front, making it the master.
    pub fn add(&mut self, window: WindowId) {
        self.clients.push_front(window);
    }

    /// Remove the first entry matching `window`.
    ///
    /// Returns `false` (and does nothing) if the window is not here.
    pub fn remove(&mut self, window: WindowId) -> bool {
        match self.clients.iter().position(|&w| w == window) {
            Some(idx) => {
                self.clients.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.clients.contains(&window)
    }

    pub fn count(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Clients front to back (master first).
    pub fn iter(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.clients.iter().copied()
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn clear_stale(&mut self) {
        self.stale = false;
    }
}

/// The full set of workspaces.
#[derive(Debug, Clone)]
pub struct Workspaces {
    inner: Vec<Workspace>,
}

impl Default for Workspaces {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspaces {
    /// Create [`NUM_WORKSPACES`] empty workspaces.
    pub fn new() -> Self {
        Self {
            inner: (0..NUM_WORKSPACES).map(|_| Workspace::new()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Workspace> {
        self.inner.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Workspace> {
        self.inner.get_mut(index)
    }

    /// Index of the workspace holding `window`, if any.
    pub fn find(&self, window: WindowId) -> Option<usize> {
        self.inner.iter().position(|ws| ws.contains(window))
    }

    /// Add `window` to the front of workspace `index`.
    ///
    /// Returns `false` without mutating anything if `index` is out of range
    /// or the window is already managed somewhere.
    pub fn add(&mut self, index: usize, window: WindowId) -> bool {
        if index >= self.inner.len() || self.find(window).is_some() {
            return false;
        }
        self.inner[index].add(window);
        true
    }

    /// Remove `window` from workspace `index`.  Missing entries are a no-op.
    pub fn remove(&mut self, index: usize, window: WindowId) -> bool {
        self.inner
            .get_mut(index)
            .map(|ws| ws.remove(window))
            .unwrap_or(false)
    }

    /// Take every client out of every workspace, in workspace order.
    pub fn drain_all(&mut self) -> Vec<WindowId> {
        self.inner
            .iter_mut()
            .flat_map(|ws| std::mem::take(&mut ws.clients))
            .collect()
    }

    /// Total number of managed windows.
    pub fn total(&self) -> usize {
        self.inner.iter().map(Workspace::count).sum()
    }
}
