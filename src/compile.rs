//! Sass compilation backend.
//!
//! Two-stage pipeline: `grass` compiles the sass/scss source (indented or
//! scss syntax, selected by file extension) to plain CSS, then `lightningcss`
//! minifies it and records mappings into a source map. The map embeds the
//! original source contents so browser devtools work without serving the
//! styles directory.

use std::fs;
use std::path::Path;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use parcel_sourcemap::SourceMap;

use crate::error::CompileError;

/// Result of one compile call: minified CSS text and source-map JSON.
#[derive(Debug)]
pub struct CompiledStyle {
    pub css: String,
    pub map: String,
}

/// Compile a stylesheet source to minified CSS plus a source map.
///
/// `output_filename` is recorded as the map's `file` field; `map_filename`
/// ends up in the `sourceMappingURL` comment appended to the CSS.
pub fn compile(
    source: &Path,
    output_filename: &str,
    map_filename: &str,
) -> Result<CompiledStyle, CompileError> {
    let options = match source.parent() {
        Some(parent) => grass::Options::default().load_path(parent),
        None => grass::Options::default(),
    };
    let expanded = grass::from_path(source, &options)
        .map_err(|err| CompileError::Sass(source.to_path_buf(), err))?;

    minify_with_map(&expanded, source, output_filename, map_filename)
}

/// Minify CSS and emit a source map referencing `source`.
fn minify_with_map(
    css: &str,
    source: &Path,
    output_filename: &str,
    map_filename: &str,
) -> Result<CompiledStyle, CompileError> {
    let source_name = source.to_string_lossy();

    let mut source_map = SourceMap::new("/");
    source_map.add_source(&source_name);
    let contents = fs::read_to_string(source)
        .map_err(|err| CompileError::SourceMap(source.to_path_buf(), err.to_string()))?;
    source_map
        .set_source_content(0, &contents)
        .map_err(|err| CompileError::SourceMap(source.to_path_buf(), err.to_string()))?;

    let stylesheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: source_name.into_owned(),
            ..ParserOptions::default()
        },
    )
    .map_err(|err| CompileError::Minify(source.to_path_buf(), err.to_string()))?;

    let output = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            source_map: Some(&mut source_map),
            ..PrinterOptions::default()
        })
        .map_err(|err| CompileError::Minify(source.to_path_buf(), err.to_string()))?;

    let map = render_map(&mut source_map, output_filename)
        .map_err(|message| CompileError::SourceMap(source.to_path_buf(), message))?;

    // Exact line endings matter downstream; keep the comment on its own line.
    let css = format!("{}\n/*# sourceMappingURL={map_filename} */\n", output.code);

    Ok(CompiledStyle { css, map })
}

/// Serialize the map, stamping the output filename into its `file` field.
fn render_map(source_map: &mut SourceMap, output_filename: &str) -> Result<String, String> {
    let json = source_map.to_json(None).map_err(|err| err.to_string())?;
    let mut value: serde_json::Value =
        serde_json::from_str(&json).map_err(|err| err.to_string())?;
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "file".to_string(),
            serde_json::Value::String(output_filename.to_string()),
        );
    }
    serde_json::to_string(&value).map_err(|err| err.to_string())
}
