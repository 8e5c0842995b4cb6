//! Extra stylesheet pipeline for static site generators.
//!
//! Discovers a single sass/scss entry point in a project-relative styles
//! directory, compiles it to minified CSS with a source map, writes the
//! result as a uniquely-named asset under the site output directory, and
//! injects a `<link rel="stylesheet">` into every rendered page.
//!
//! The host build pipeline drives three lifecycle hooks on
//! [`ExtraSassPlugin`]:
//!
//! - [`on_config`](ExtraSassPlugin::on_config) when configuration is
//!   (re)loaded — starts a fresh build cycle.
//! - [`on_post_page`](ExtraSassPlugin::on_post_page) for each rendered page —
//!   returns the page HTML with the stylesheet link added (or unchanged when
//!   no stylesheet source exists).
//! - [`on_serve`](ExtraSassPlugin::on_serve) when development serving starts —
//!   registers the styles directory with a watch mechanism so edits trigger a
//!   full rebuild.
//!
//! # Example
//!
//! ```ignore
//! let mut plugin = ExtraSassPlugin::new();
//! let config = PluginConfig::new("public");
//!
//! plugin.on_config(&config);
//! let html = plugin.on_post_page(&rendered, "blog/post/", &config)?;
//! ```

mod artifact;
mod compile;
mod config;
mod entry;
mod error;
mod inject;
pub mod logger;
mod plugin;
mod watch;

pub use artifact::{ARTIFACT_PREFIX, ARTIFACT_SUFFIX, CompiledArtifact, save_to};
pub use compile::{CompiledStyle, compile};
pub use config::{ConfigError, PluginConfig};
pub use entry::{AvailableEntry, STYLE_FILENAMES, StyleEntry};
pub use error::CompileError;
pub use inject::{inject_stylesheet, relative_href};
pub use plugin::{DEST_DIR, ExtraSassPlugin};
pub use watch::{RebuildWatcher, WatchRegistrar};
