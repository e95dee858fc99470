//! Detached process launch.

use crate::traits::Spawner;
use log::{debug, warn};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

/// [`Spawner`] that starts children in their own process group with no
/// stdio attached.
///
/// The caller never waits.  Each child is reaped by a short-lived thread
/// blocked in `wait`, so exited children do not linger as zombies.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSpawner;

impl Spawner for DetachedSpawner {
    fn spawn(&self, argv: &[String]) -> io::Result<()> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()?;
        let pid = child.id();
        debug!("spawned {} (pid {})", program, pid);

        let reaper = std::thread::Builder::new()
            .name(format!("reap-{}", pid))
            .spawn(move || match child.wait() {
                Ok(status) => debug!("child {} exited: {}", pid, status),
                Err(e) => warn!("failed to reap child {}: {}", pid, e),
            });
        if let Err(e) = reaper {
            // The child is running; only its exit status is lost.
            warn!("no reaper thread for child {}: {}", pid, e);
        }
        Ok(())
    }
}
