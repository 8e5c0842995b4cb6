//! Watch registration for development serving.
//!
//! The plugin does not own a serve loop; it only asks the host to watch the
//! styles directory. [`WatchRegistrar`] is the seam the host implements, and
//! [`RebuildWatcher`] is a ready-made implementation that fires a full-rebuild
//! callback on relevant filesystem events.

use std::path::Path;

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::{debug, log};

/// Host-side registration of directories to watch during serving.
pub trait WatchRegistrar {
    /// Watch `path` recursively; any change under it triggers a rebuild.
    fn watch(&mut self, path: &Path) -> Result<()>;
}

/// Filesystem watcher bound to an external rebuild trigger.
///
/// Changes are not debounced and no incremental recompilation happens here:
/// every relevant event hands control back to the host's rebuild, which runs
/// a fresh build cycle (and with it a fresh compile).
pub struct RebuildWatcher {
    watcher: RecommendedWatcher,
}

impl RebuildWatcher {
    /// Create a watcher invoking `rebuild` on file content changes.
    pub fn new<F>(rebuild: F) -> notify::Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let watcher = notify::recommended_watcher(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) if is_rebuild_event(&event.kind) => rebuild(),
                Ok(_) => {}
                Err(err) => log!("watch"; "watch error: {err}"),
            },
        )?;
        Ok(Self { watcher })
    }
}

impl WatchRegistrar for RebuildWatcher {
    fn watch(&mut self, path: &Path) -> Result<()> {
        self.watcher.watch(path, RecursiveMode::Recursive)?;
        debug!("watch"; "watching {}", path.display());
        Ok(())
    }
}

/// Events that warrant a rebuild. Metadata-only modifications (permission
/// changes, mtime touches from the build itself) do not.
fn is_rebuild_event(kind: &notify::EventKind) -> bool {
    use notify::EventKind;
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(modify) => !matches!(modify, notify::event::ModifyKind::Metadata(_)),
        _ => false,
    }
}
