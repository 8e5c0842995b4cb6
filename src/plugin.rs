//! Host lifecycle hooks and per-cycle build coordination.
//!
//! One [`ExtraSassPlugin`] instance lives as long as the host process. Each
//! configuration (re)load starts a build cycle; within a cycle the entry
//! point is resolved at most once, on first demand, and every rendered page
//! reuses the result.

use std::error::Error as _;

use crate::artifact;
use crate::config::PluginConfig;
use crate::entry::StyleEntry;
use crate::error::CompileError;
use crate::inject;
use crate::watch::WatchRegistrar;
use crate::{debug, log};

/// Destination of compiled stylesheets, relative to the site output root.
pub const DEST_DIR: &str = "assets/stylesheets";

/// Auxiliary stylesheet plugin for a host site-generation pipeline.
#[derive(Debug, Default)]
pub struct ExtraSassPlugin {
    /// `None` until the first access of a cycle; resolved exactly once after.
    entry: Option<StyleEntry>,
}

impl ExtraSassPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host hook: configuration was (re)loaded. Starts a fresh build cycle;
    /// the next access re-runs discovery and compilation from scratch.
    pub fn on_config(&mut self, _config: &PluginConfig) {
        self.entry = None;
    }

    /// Host hook: a page finished rendering.
    ///
    /// Returns the HTML unchanged when no compiled stylesheet is available,
    /// otherwise injects a `<link>` whose href is relative to `page_url`.
    /// Fails only in strict mode, and only if this call was the one that
    /// resolved the entry point.
    pub fn on_post_page(
        &mut self,
        html: &str,
        page_url: &str,
        config: &PluginConfig,
    ) -> Result<String, CompileError> {
        let entry = self.entry_point(config)?;
        let Some(relative_path) = entry.relative_path() else {
            return Ok(html.to_string());
        };

        let href = inject::relative_href(relative_path, page_url);
        debug!("sass"; "add on page: {page_url}, href: {href}");
        Ok(inject::inject_stylesheet(html, &href))
    }

    /// Host hook: development serving is starting.
    ///
    /// Registers the styles directory with the watch mechanism when an entry
    /// point exists and its source file is still on disk. Registration
    /// failures are logged, not fatal.
    pub fn on_serve(
        &mut self,
        registrar: &mut dyn WatchRegistrar,
        config: &PluginConfig,
    ) -> Result<(), CompileError> {
        let entry = self.entry_point(config)?;
        if let StyleEntry::Available(available) = entry
            && available.source_path().is_file()
        {
            let dir = available.dir().to_path_buf();
            if let Err(err) = registrar.watch(&dir) {
                log!("error"; "failed to watch {}: {err:#}", dir.display());
            }
        }
        Ok(())
    }

    /// Resolve the entry point for this cycle, compiling on first access.
    ///
    /// The transition to the resolved state happens regardless of compile
    /// outcome; a failed compile is never retried within the cycle. The
    /// failure is propagated only in strict mode.
    fn entry_point(&mut self, config: &PluginConfig) -> Result<&StyleEntry, CompileError> {
        if self.entry.is_none() {
            let mut entry = StyleEntry::locate(&config.styles_dir);
            let mut failure = None;

            if let StyleEntry::Available(available) = &mut entry {
                match artifact::save_to(available, &config.site_dir, DEST_DIR) {
                    Ok(result) => {
                        log!(
                            "sass";
                            "build css \"{}\" from \"{}\"",
                            result.relative_path,
                            result.source.display()
                        );
                        available.record_relative_path(result.relative_path);
                    }
                    Err(err) => {
                        log_failure(&err);
                        if config.strict {
                            failure = Some(err);
                        }
                    }
                }
            }

            self.entry = Some(entry);
            if let Some(err) = failure {
                return Err(err);
            }
        }

        Ok(self.entry.get_or_insert(StyleEntry::NotFound))
    }
}

/// Log a compile failure with its full cause chain.
fn log_failure(err: &CompileError) {
    log!("error"; "failed to build extra css: {err}");
    let mut cause = err.source();
    while let Some(c) = cause {
        log!("error"; "  caused by: {c}");
        cause = c.source();
    }
}
