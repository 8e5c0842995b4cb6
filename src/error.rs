//! Error types for the stylesheet pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while producing the compiled stylesheet artifact.
///
/// Absence of a stylesheet source is not an error (see
/// [`StyleEntry::NotFound`](crate::StyleEntry::NotFound)); these variants
/// cover everything that can go wrong once a source exists.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to create output directory `{0}`")]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to allocate stylesheet file in `{0}`")]
    Allocate(PathBuf, #[source] std::io::Error),

    #[error("sass compilation failed for `{0}`")]
    Sass(PathBuf, #[source] Box<grass::Error>),

    #[error("css minification failed for `{0}`: {1}")]
    Minify(PathBuf, String),

    #[error("source map generation failed for `{0}`: {1}")]
    SourceMap(PathBuf, String),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display_carries_path() {
        let err = CompileError::CreateDir(
            PathBuf::from("site/assets/stylesheets"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{err}");
        assert!(display.contains("site/assets/stylesheets"));

        let err = CompileError::Minify(PathBuf::from("extra_sass/style.scss"), "bad token".into());
        let display = format!("{err}");
        assert!(display.contains("style.scss"));
        assert!(display.contains("bad token"));
    }
}
