//! Compiled artifact writing.
//!
//! Each build cycle deposits one freshly-named CSS file (plus its source map)
//! under the site output directory. Filenames get a random infix from the
//! exclusive-create allocation, so repeated builds never collide and a serving
//! browser never sees a half-written stylesheet under a previously published
//! name. Stale artifacts from earlier builds are left for the host's
//! output-directory lifecycle to clean up.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::compile;
use crate::entry::AvailableEntry;
use crate::error::CompileError;

/// Fixed filename prefix of the compiled stylesheet.
pub const ARTIFACT_PREFIX: &str = "extra-style.";
/// Fixed filename suffix of the compiled stylesheet.
pub const ARTIFACT_SUFFIX: &str = ".min.css";

/// Result of one compile-and-write call.
#[derive(Debug)]
pub struct CompiledArtifact {
    /// Path of the stylesheet source that was compiled.
    pub source: PathBuf,
    /// Site-relative path of the written CSS file (`dest_dir/<filename>`).
    pub relative_path: String,
}

/// Compile `entry` and write the CSS + source map under `site_dir/dest_dir`.
///
/// The CSS file is allocated with exclusive creation and world-appropriate
/// permissions (`0o666` masked by the process umask on Unix), the mode any
/// other generated site asset would get. If writing the map fails, the CSS
/// file is left in place without one.
pub fn save_to(
    entry: &AvailableEntry,
    site_dir: &Path,
    dest_dir: &str,
) -> Result<CompiledArtifact, CompileError> {
    let source = entry.source_path();

    let output_dir = site_dir.join(dest_dir);
    fs::create_dir_all(&output_dir)
        .map_err(|err| CompileError::CreateDir(output_dir.clone(), err))?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(ARTIFACT_PREFIX).suffix(ARTIFACT_SUFFIX);
    // Exclusive-create APIs default to owner-only 0o600; generated assets
    // must be readable by whatever serves the output directory.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut css_file = builder
        .tempfile_in(&output_dir)
        .map_err(|err| CompileError::Allocate(output_dir.clone(), err))?;

    let css_path = css_file.path().to_path_buf();
    let Some(css_filename) = css_path.file_name().and_then(|name| name.to_str()) else {
        return Err(CompileError::Allocate(
            output_dir,
            io::Error::other("allocated stylesheet file has no utf-8 name"),
        ));
    };
    let css_filename = css_filename.to_owned();
    let map_filename = format!("{css_filename}.map");

    let compiled = compile::compile(&source, &css_filename, &map_filename)?;

    css_file
        .write_all(compiled.css.as_bytes())
        .map_err(|err| CompileError::Write(css_path.clone(), err))?;
    css_file
        .keep()
        .map_err(|err| CompileError::Write(css_path.clone(), err.error))?;

    // Written after the CSS is persisted: a map-write failure leaves a valid
    // stylesheet behind, just without devtools support.
    let map_path = output_dir.join(&map_filename);
    fs::write(&map_path, compiled.map.as_bytes())
        .map_err(|err| CompileError::Write(map_path.clone(), err))?;

    Ok(CompiledArtifact {
        source,
        relative_path: format!("{dest_dir}/{css_filename}"),
    })
}
