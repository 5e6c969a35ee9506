pub mod formatter;

pub use formatter::{Formatter, Tabular};

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::api::types::PageResult;
use crate::error::{KakaoError, Result};
use formatter::{to_xml, Pages};

/// File format for saved results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Json,
    Xml,
}

impl SaveFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("xml") => Ok(Self::Xml),
            other => Err(KakaoError::UnsupportedFormat(other.unwrap_or("").to_string())),
        }
    }
}

/// Write fetched pages to `path`
pub fn save<D: Serialize>(path: &Path, pages: &[PageResult<D>], format: SaveFormat) -> Result<()> {
    let contents = match format {
        SaveFormat::Json => serde_json::to_string_pretty(pages)?,
        SaveFormat::Xml => to_xml("pages", &Pages { pages })?,
    };
    fs::write(path, contents)?;
    log::info!("Saved {} page(s) to {}", pages.len(), path.display());
    Ok(())
}
