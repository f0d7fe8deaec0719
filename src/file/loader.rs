//! Document loading functionality.
//!
//! This module provides functions to load JSON or YAML documents from files
//! or stdin, decompressing gzip input transparently, and converting them into
//! [`Value`] graphs ready to be searched.

use crate::document::node::Value;
use crate::document::parser::{parse_json, parse_yaml};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Text format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

/// Loads and parses a JSON or YAML file from the filesystem.
///
/// Files ending in `.gz` are decompressed first. The format is taken from
/// the extension before any `.gz` suffix: `.yaml`/`.yml` is YAML, anything
/// else is JSON.
///
/// # Examples
///
/// ```no_run
/// use structprobe::file::loader::load_file;
///
/// let root = load_file("config.json").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist
/// - The file cannot be read (permissions, etc.)
/// - The file is gzipped but corrupted
/// - The file contents are not valid in the detected format
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let format = determine_format(path_ref);
    log::debug!(
        "loaded {} ({:?}, {} bytes)",
        path_ref.display(),
        format,
        content.len()
    );
    parse_content(&content, format)
}

/// Loads and parses a document from standard input.
///
/// Gzip input is detected by its magic bytes. JSON is tried first; if that
/// fails the input is parsed as YAML.
pub fn load_from_stdin() -> Result<Value> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = decode_bytes(buffer)?;

    if let Ok(value) = parse_json(&content) {
        return Ok(value);
    }

    parse_yaml(&content)
        .context("Failed to parse stdin: input is neither valid JSON nor valid YAML")
}

/// Parses document text in the given format.
pub fn parse_content(content: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => parse_json(content),
        Format::Yaml => parse_yaml(content),
    }
}

/// Determines the document format from a file name.
///
/// Examples:
/// - `data.yaml` → YAML
/// - `data.yml.gz` → YAML
/// - `data.json.gz` → JSON
pub fn determine_format<P: AsRef<Path>>(path: P) -> Format {
    let path_str = path.as_ref().to_string_lossy().to_ascii_lowercase();

    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".yaml") || base.ends_with(".yml") {
        Format::Yaml
    } else {
        Format::Json
    }
}

/// Decodes raw input, gunzipping it when it starts with the gzip magic bytes.
fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
