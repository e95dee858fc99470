//! [`Session`] implementation backed by an X11 connection.
//!
//! Becoming the window manager means selecting `SubstructureRedirect` on the
//! root window; the server allows only one client to do so, so a failure
//! here means another window manager is running.

use crate::event::{CloseProtocol, Event, Geometry, Keysym, Modifiers, ScreenSize, WindowId};
use crate::traits::Session;
use crate::x11::hidden::HiddenWindows;
use crate::x11::keymap::Keymap;
use log::{debug, info, warn};
use std::cell::RefCell;
use x11rb::connection::Connection;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError};
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ChangeWindowAttributesAux, ClientMessageData, ClientMessageEvent,
    ConfigureWindowAux, ConnectionExt as _, EventMask, Grab, GrabMode, Mapping, ModMask, Window,
    CLIENT_MESSAGE_EVENT,
};
use x11rb::protocol::Event as XEvent;
use x11rb::rust_connection::RustConnection;

/// Errors that can occur when talking to the X server.
#[derive(Debug, thiserror::Error)]
pub enum X11Error {
    #[error("cannot open display: {0}")]
    Connect(#[from] ConnectError),
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("request failed: {0}")]
    Reply(#[from] ReplyError),
    #[error("another window manager is already running")]
    AnotherWm,
}

/// Interned atoms used by the close protocol.
#[derive(Debug, Clone, Copy)]
struct Atoms {
    wm_protocols: Atom,
    wm_delete_window: Atom,
    wm_take_focus: Atom,
}

impl Atoms {
    fn intern(conn: &RustConnection) -> Result<Self, X11Error> {
        let wm_protocols = conn.intern_atom(false, b"WM_PROTOCOLS")?;
        let wm_delete_window = conn.intern_atom(false, b"WM_DELETE_WINDOW")?;
        let wm_take_focus = conn.intern_atom(false, b"WM_TAKE_FOCUS")?;
        Ok(Self {
            wm_protocols: wm_protocols.reply()?.atom,
            wm_delete_window: wm_delete_window.reply()?.atom,
            wm_take_focus: wm_take_focus.reply()?.atom,
        })
    }

    fn protocol(&self, atom: Atom) -> CloseProtocol {
        if atom == self.wm_delete_window {
            CloseProtocol::DeleteWindow
        } else if atom == self.wm_take_focus {
            CloseProtocol::TakeFocus
        } else {
            CloseProtocol::Other(atom)
        }
    }
}

/// X11-backed session managing the default screen.
pub struct X11Session {
    conn: RustConnection,
    root: Window,
    screen: ScreenSize,
    atoms: Atoms,
    keymap: Keymap,
    /// Every grab requested so far, replayed when the keymap changes.
    grabs: RefCell<Vec<(Modifiers, Keysym)>>,
    /// Unmaps we issued ourselves and whose `UnmapNotify` may still be due.
    hidden: RefCell<HiddenWindows>,
}

impl X11Session {
    /// Connect to `$DISPLAY` and claim the window-manager role.
    pub fn open() -> Result<Self, X11Error> {
        let (conn, screen_num) = RustConnection::connect(None)?;

        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let size = ScreenSize {
            width: u32::from(screen.width_in_pixels),
            height: u32::from(screen.height_in_pixels),
        };
        info!(
            "connected to X11, screen {}, root window 0x{:x}, {}x{}",
            screen_num, root, size.width, size.height
        );

        let event_mask = EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY;
        conn.change_window_attributes(
            root,
            &ChangeWindowAttributesAux::new().event_mask(event_mask),
        )?
        .check()
        .map_err(|e| {
            debug!("substructure redirect refused: {}", e);
            X11Error::AnotherWm
        })?;

        let atoms = Atoms::intern(&conn)?;
        let keymap = Keymap::load(&conn)?;

        Ok(Self {
            conn,
            root,
            screen: size,
            atoms,
            keymap,
            grabs: RefCell::new(Vec::new()),
            hidden: RefCell::new(HiddenWindows::new()),
        })
    }

    /// Grab `keysym` + `modifiers`, also under CapsLock and NumLock.
    fn grab_now(&self, modifiers: Modifiers, keysym: Keysym) -> Result<(), X11Error> {
        let Some(keycode) = self.keymap.keycode(keysym) else {
            warn!("no keycode for keysym 0x{:x}, not grabbed", keysym);
            return Ok(());
        };

        let numlock = Modifiers::MOD2;
        let capslock = Modifiers::LOCK;
        for extra in [Modifiers::NONE, capslock, numlock, capslock | numlock] {
            self.conn.grab_key(
                false,
                self.root,
                ModMask::from((modifiers | extra).0),
                keycode,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
            )?;
        }
        debug!(
            "grabbed keycode {} (keysym 0x{:x}, mods {})",
            keycode, keysym, modifiers
        );
        Ok(())
    }

    /// Reload the keyboard mapping and redo every grab.
    fn refresh_keymap(&mut self) -> Result<(), X11Error> {
        self.keymap = Keymap::load(&self.conn)?;
        self.conn.ungrab_key(Grab::ANY, self.root, ModMask::ANY)?;
        for (modifiers, keysym) in self.grabs.borrow().iter() {
            self.grab_now(*modifiers, *keysym)?;
        }
        self.conn.flush()?;
        info!("keyboard mapping changed, keys re-grabbed");
        Ok(())
    }
}

impl Session for X11Session {
    type Error = X11Error;

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    fn grab_key(&self, modifiers: Modifiers, keysym: Keysym) -> Result<(), X11Error> {
        self.grabs.borrow_mut().push((modifiers, keysym));
        self.grab_now(modifiers, keysym)?;
        self.conn.flush()?;
        Ok(())
    }

    fn next_event(&mut self) -> Result<Event, X11Error> {
        loop {
            self.conn.flush()?;
            let (event, sequence) = self.conn.wait_for_event_with_sequence()?;
            match event {
                XEvent::KeyPress(e) => {
                    return Ok(Event::KeyPress {
                        modifiers: Modifiers(u16::from(e.state)),
                        keysym: self.keymap.keysym(e.detail),
                        keycode: e.detail,
                    });
                }
                XEvent::MapRequest(e) => return Ok(Event::MapRequest(WindowId(e.window))),
                XEvent::UnmapNotify(e) => {
                    if e.event != self.root
                        || self.hidden.borrow_mut().take_own_unmap(e.window, sequence)
                    {
                        continue;
                    }
                    return Ok(Event::UnmapNotify(WindowId(e.window)));
                }
                XEvent::DestroyNotify(e) => {
                    self.hidden.borrow_mut().forget(e.window);
                    return Ok(Event::DestroyNotify(WindowId(e.window)));
                }
                XEvent::MappingNotify(e) => {
                    if e.request != Mapping::POINTER {
                        if let Err(err) = self.refresh_keymap() {
                            warn!("failed to refresh keymap: {}", err);
                        }
                    }
                }
                XEvent::Error(e) => {
                    // Requests are fire-and-forget; their errors are not acted on.
                    debug!("X11 error: {:?}", e);
                }
                _ => return Ok(Event::Other),
            }
        }
    }

    fn set_geometry(&self, window: WindowId, geometry: Geometry) -> Result<(), X11Error> {
        self.conn.configure_window(
            window.0,
            &ConfigureWindowAux::new()
                .x(geometry.x)
                .y(geometry.y)
                .width(geometry.width)
                .height(geometry.height),
        )?;
        Ok(())
    }

    fn set_visible(&self, window: WindowId, visible: bool) -> Result<(), X11Error> {
        if visible {
            self.conn.map_window(window.0)?;
        } else {
            let cookie = self.conn.unmap_window(window.0)?;
            self.hidden
                .borrow_mut()
                .hide(window.0, cookie.sequence_number());
        }
        Ok(())
    }

    fn pointer_target(&self) -> Result<Option<WindowId>, X11Error> {
        let reply = self.conn.query_pointer(self.root)?.reply()?;
        Ok((reply.child != x11rb::NONE).then_some(WindowId(reply.child)))
    }

    fn close_protocols(&self, window: WindowId) -> Result<Vec<CloseProtocol>, X11Error> {
        let reply = self
            .conn
            .get_property(
                false,
                window.0,
                self.atoms.wm_protocols,
                AtomEnum::ATOM,
                0,
                32,
            )?
            .reply()?;
        Ok(reply
            .value32()
            .map(|atoms| atoms.map(|a| self.atoms.protocol(a)).collect())
            .unwrap_or_default())
    }

    fn send_close_request(&self, window: WindowId) -> Result<(), X11Error> {
        let data = ClientMessageData::from([
            self.atoms.wm_delete_window,
            x11rb::CURRENT_TIME,
            0u32,
            0u32,
            0u32,
        ]);
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: window.0,
            type_: self.atoms.wm_protocols,
            data,
        };
        self.conn
            .send_event(false, window.0, EventMask::NO_EVENT, event)?;
        self.conn.flush()?;
        Ok(())
    }

    fn destroy(&self, window: WindowId) -> Result<(), X11Error> {
        self.conn.destroy_window(window.0)?;
        self.conn.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), X11Error> {
        self.conn.flush()?;
        info!("X11 session closed");
        Ok(())
    }
}
