//! Settings hot reload.
//!
//! Watches the settings file's directory (editors often replace the file
//! rather than write in place) and reports changes to that one file.
//! Events are buffered by the watcher thread; the host drains them with
//! [`SettingsWatcher::poll`] from its own loop.

use anyhow::Context;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // The receiver is gone once the watcher is dropped.
            let _ = tx.send(res);
        })
        .context("creating settings file watcher")?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("watching {}", dir.display()))?;

        debug!(path = %path.display(), "Watching settings file");
        Ok(Self {
            _watcher: watcher,
            events: rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending notifications and return the latest one about the
    /// settings file, if any.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut latest = None;
        loop {
            match self.events.try_recv() {
                Ok(Ok(event)) => {
                    if let Some(e) = classify(&event, &self.path) {
                        trace!(?e, "Settings file event");
                        latest = Some(e);
                    }
                }
                Ok(Err(e)) => latest = Some(SettingsEvent::Error(e.to_string())),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    latest.get_or_insert(SettingsEvent::Error("watcher disconnected".into()));
                    break;
                }
            }
        }
        latest
    }
}

fn classify(event: &Event, path: &Path) -> Option<SettingsEvent> {
    let ours = event
        .paths
        .iter()
        .any(|p| p == path || (p.file_name().is_some() && p.file_name() == path.file_name()));
    if !ours {
        return None;
    }

    match event.kind {
        EventKind::Create(_) => Some(SettingsEvent::Created),
        EventKind::Modify(_) => Some(SettingsEvent::Modified),
        EventKind::Remove(_) => Some(SettingsEvent::Deleted),
        _ => None,
    }
}
