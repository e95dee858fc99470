//! The main orchestrator that ties the registry, layout, key bindings and
//! session together.
//!
//! [`Manager`] owns all window-manager state and reacts to [`Event`]s from a
//! [`Session`] by updating the registry and issuing geometry, visibility and
//! close commands back to it.  Everything runs on one thread: the only
//! suspension point is [`Session::next_event`].

use crate::bindings::{Action, Bindings};
use crate::close::close_window;
use crate::config::Config;
use crate::event::{Event, Keysym, Modifiers, WindowId};
use crate::layout::master_stack;
use crate::traits::{Session, Spawner};
use crate::workspace::Workspaces;
use log::{debug, error, info, warn};

/// Possible errors from the manager.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// The session stopped delivering events.
    #[error("session error: {0}")]
    Session(String),
}

/// Window-manager state plus its collaborators.
///
/// The manager is generic over any [`Session`] and [`Spawner`], so it is
/// independent of X11 and can be driven by scripted sessions in tests.
///
/// # Typical usage
///
/// ```ignore
/// let session = X11Session::open()?;
/// let mut manager = Manager::new(session, DetachedSpawner, Config::default());
/// manager.grab_keys();
/// manager.run()?;
/// ```
pub struct Manager<S: Session, P: Spawner> {
    session: S,
    spawner: P,
    config: Config,
    bindings: Bindings,
    workspaces: Workspaces,
    current: usize,
    last: usize,
    should_terminate: bool,
}

impl<S: Session, P: Spawner> Manager<S, P> {
    /// Create a manager showing workspace 0, with every workspace empty.
    pub fn new(session: S, spawner: P, config: Config) -> Self {
        Self {
            session,
            spawner,
            config,
            bindings: Bindings::default(),
            workspaces: Workspaces::new(),
            current: 0,
            last: 0,
            should_terminate: false,
        }
    }

    /// Index of the visible workspace.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the workspace shown before the most recent switch.
    pub fn last(&self) -> usize {
        self.last
    }

    pub fn should_terminate(&self) -> bool {
        self.should_terminate
    }

    pub fn workspaces(&self) -> &Workspaces {
        &self.workspaces
    }

    /// Grab every bound key combination on the session.
    pub fn grab_keys(&self) {
        for (modifiers, keysym) in self.bindings.grab_list() {
            if let Err(e) = self.session.grab_key(modifiers, keysym) {
                warn!("failed to grab {} + 0x{:x}: {}", modifiers, keysym, e);
            }
        }
        info!("grabbed {} key bindings", self.bindings.len());
    }

    /// Run the event loop until quit is requested or the session fails,
    /// then destroy every remaining client and close the session.
    ///
    /// The quit flag is checked before blocking on the next event, so a
    /// quit takes effect as soon as the handler that set it returns.
    pub fn run(&mut self) -> Result<(), ManagerError> {
        info!("entering event loop");
        let mut result = Ok(());

        while !self.should_terminate {
            match self.session.next_event() {
                Ok(event) => self.handle(event),
                Err(e) => {
                    error!("session failed: {}", e);
                    result = Err(ManagerError::Session(e.to_string()));
                    break;
                }
            }
        }

        self.shutdown();
        result
    }

    /// Process a single [`Event`].
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::KeyPress {
                modifiers,
                keysym,
                keycode,
            } => {
                debug!(
                    "key press: keycode={} keysym=0x{:x} state={}",
                    keycode, keysym, modifiers
                );
                self.on_key_press(modifiers, keysym);
            }
            Event::MapRequest(window) => self.on_map_request(window),
            Event::UnmapNotify(window) => self.on_unmap(window),
            Event::DestroyNotify(window) => self.on_destroy(window),
            Event::Other => {}
        }
    }

    /// Carry out a bound [`Action`].
    pub fn dispatch(&mut self, action: Action) {
        info!("action: {}", action);
        match action {
            Action::SpawnTerminal => {
                if let Err(e) = self.spawner.spawn(&self.config.terminal) {
                    error!("failed to spawn {:?}: {}", self.config.terminal, e);
                }
            }
            Action::CloseFocused => match self.session.pointer_target() {
                Ok(Some(window)) => {
                    close_window(&self.session, window);
                }
                Ok(None) => debug!("nothing under the pointer to close"),
                Err(e) => warn!("pointer query failed: {}", e),
            },
            Action::Quit => self.should_terminate = true,
            Action::SwitchTo(target) => self.switch_to(target),
            Action::ToggleLast => self.toggle_last(),
        }
    }

    /// Make workspace `target` the visible one.
    ///
    /// Does nothing when `target` is already visible or out of range.
    /// Otherwise hides the current workspace's clients, remembers it as the
    /// last workspace and shows the target's clients.  Geometry is only
    /// recomputed when the target's membership changed while it was hidden.
    pub fn switch_to(&mut self, target: usize) {
        if target == self.current || target >= self.workspaces.len() {
            debug!("switch to {} ignored (current {})", target, self.current);
            return;
        }
        info!("switch workspace {} -> {}", self.current, target);

        self.set_workspace_visible(self.current, false);
        self.last = self.current;
        self.current = target;

        let stale = self
            .workspaces
            .get(target)
            .is_some_and(|ws| ws.is_stale());
        if stale {
            self.retile(target);
            if let Some(ws) = self.workspaces.get_mut(target) {
                ws.clear_stale();
            }
        }
        self.set_workspace_visible(target, true);
    }

    /// Switch back to the workspace shown before the last switch.
    pub fn toggle_last(&mut self) {
        self.switch_to(self.last);
    }

    /// Destroy every managed window and release the session.
    ///
    /// Each client is destroyed once; calling this again finds an empty
    /// registry.
    pub fn shutdown(&mut self) {
        let clients = self.workspaces.drain_all();
        info!("shutting down, destroying {} client(s)", clients.len());
        for window in clients {
            if let Err(e) = self.session.destroy(window) {
                warn!("destroy of {} failed: {}", window, e);
            }
        }
        if let Err(e) = self.session.close() {
            warn!("closing session failed: {}", e);
        }
    }

    //  Event handlers

    fn on_key_press(&mut self, modifiers: Modifiers, keysym: Keysym) {
        if let Some(action) = self.bindings.lookup(modifiers, keysym) {
            self.dispatch(action);
        }
    }

    fn on_map_request(&mut self, window: WindowId) {
        match self.workspaces.find(window) {
            None => {
                self.workspaces.add(self.current, window);
                debug!("managing {} on workspace {}", window, self.current);
                self.set_visible(window, true);
                self.retile(self.current);
            }
            Some(ws) if ws == self.current => {
                debug!("{} already managed, remapping", window);
                self.set_visible(window, true);
            }
            Some(ws) => {
                debug!("{} belongs to hidden workspace {}, keeping it hidden", window, ws);
            }
        }
    }

    fn on_unmap(&mut self, window: WindowId) {
        if self.workspaces.remove(self.current, window) {
            debug!("unmanaged {} from workspace {}", window, self.current);
            self.retile(self.current);
        }
    }

    fn on_destroy(&mut self, window: WindowId) {
        let Some(ws) = self.workspaces.find(window) else {
            return;
        };
        self.workspaces.remove(ws, window);
        debug!("{} destroyed on workspace {}", window, ws);
        if ws == self.current {
            self.retile(ws);
        } else if let Some(workspace) = self.workspaces.get_mut(ws) {
            workspace.mark_stale();
        }
    }

    //  Session helpers

    /// Apply the master-stack layout to workspace `index`.
    fn retile(&self, index: usize) {
        let Some(ws) = self.workspaces.get(index) else {
            return;
        };
        let screen = self.session.screen_size();
        let geometries = master_stack(ws.count(), screen, self.config.master_ratio);
        for (window, geometry) in ws.iter().zip(geometries) {
            debug!("tile {} at {}", window, geometry);
            if let Err(e) = self.session.set_geometry(window, geometry) {
                warn!("failed to place {}: {}", window, e);
            }
        }
    }

    fn set_workspace_visible(&self, index: usize, visible: bool) {
        if let Some(ws) = self.workspaces.get(index) {
            for window in ws.iter() {
                self.set_visible(window, visible);
            }
        }
    }

    fn set_visible(&self, window: WindowId, visible: bool) {
        if let Err(e) = self.session.set_visible(window, visible) {
            warn!("failed to set visibility of {}: {}", window, e);
        }
    }
}

//  Tests
