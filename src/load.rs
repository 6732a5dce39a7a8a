//! Crate document loading
//!
//! Loads an RO-Crate metadata document from a local path (a metadata file
//! or a directory containing one, possibly with a name prefix) or from an
//! http(s) URL.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ProfileError;
use crate::vocab::METADATA_DESCRIPTOR_ID;

/// Check if a source string is a URL
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse a crate document from JSON text
pub fn parse_document(content: &str, origin: &str) -> Result<Value, ProfileError> {
    let doc: Value = serde_json::from_str(content).map_err(|e| ProfileError::LoadError {
        path: origin.to_string(),
        reason: format!("Invalid JSON: {}", e),
    })?;
    if !doc.is_object() {
        return Err(ProfileError::InvalidStructure(format!(
            "{}: crate document must be a JSON object",
            origin
        )));
    }
    Ok(doc)
}

/// Find ro-crate-metadata.json (with optional prefix) in a directory
fn find_metadata_file(dir: &Path) -> Result<PathBuf, ProfileError> {
    let standard = dir.join(METADATA_DESCRIPTOR_ID);
    if standard.exists() {
        return Ok(standard);
    }

    // Look for *-ro-crate-metadata.json
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with("-ro-crate-metadata.json") {
                    return Ok(entry.path());
                }
            }
        }
    }

    Err(ProfileError::LoadError {
        path: dir.display().to_string(),
        reason: "No ro-crate-metadata.json found".to_string(),
    })
}

fn fetch_url(url: &str) -> Result<String, ProfileError> {
    reqwest::blocking::get(url)
        .map_err(|e| ProfileError::LoadError {
            path: url.to_string(),
            reason: format!("HTTP request failed: {}", e),
        })?
        .text()
        .map_err(|e| ProfileError::LoadError {
            path: url.to_string(),
            reason: format!("Failed to read response: {}", e),
        })
}

/// Load a crate document from a local path
pub fn load_from_path(path: &Path) -> Result<Value, ProfileError> {
    let metadata_path = if path.is_dir() {
        find_metadata_file(path)?
    } else if path.is_file() {
        path.to_path_buf()
    } else {
        return Err(ProfileError::InvalidPath(path.to_path_buf()));
    };

    let content = fs::read_to_string(&metadata_path).map_err(|e| ProfileError::LoadError {
        path: metadata_path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_document(&content, &metadata_path.display().to_string())
}

/// Load a crate document from either a URL or a local path
pub fn load_document(source: &str) -> Result<Value, ProfileError> {
    if is_url(source) {
        let content = fetch_url(source)?;
        parse_document(&content, source)
    } else {
        load_from_path(Path::new(source))
    }
}
