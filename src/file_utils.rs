use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// @module: File utilities for the file-translation entry point

/// Kind of file content, selecting the markup or text pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// HTML/XML-like content, routed through the tree engine
    Markup,
    /// Anything else, routed through the text pipeline
    Text,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @detects: Markup vs plain-text content, by file extension
    pub fn detect_kind<P: AsRef<Path>>(path: P) -> FileKind {
        let extension = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            Some("html") | Some("htm") | Some("xhtml") | Some("shtml") | Some("xml") => {
                FileKind::Markup
            }
            _ => FileKind::Text,
        }
    }
}
