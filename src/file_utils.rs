use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::FileEncoding;

// @module: File and directory utilities with encoding support

/// Byte order mark written in front of UTF-16LE output
const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Find files with a specific extension directly inside a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        // WalkDir yields in OS order; sort for a stable processing order
        result.sort();
        Ok(result)
    }

    /// Read a file to a string using the given encoding
    pub fn read_to_string<P: AsRef<Path>>(path: P, encoding: FileEncoding) -> Result<String> {
        let path = path.as_ref();
        match encoding {
            FileEncoding::Utf8 => fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {:?}", path)),
            FileEncoding::Utf16Le => {
                let bytes = fs::read(path)
                    .with_context(|| format!("Failed to read file: {:?}", path))?;
                let (decoded, _, had_errors) = encoding_rs::UTF_16LE.decode(&bytes);
                if had_errors {
                    log::warn!("Invalid UTF-16 sequences replaced while reading {:?}", path);
                }
                Ok(decoded.into_owned())
            }
        }
    }

    /// Write a string to a file using the given encoding
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str, encoding: FileEncoding) -> Result<()> {
        let path = path.as_ref();

        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        match encoding {
            FileEncoding::Utf8 => fs::write(path, content)
                .with_context(|| format!("Failed to write to file: {:?}", path)),
            FileEncoding::Utf16Le => {
                let mut bytes = Vec::with_capacity(2 + content.len() * 2);
                bytes.extend_from_slice(&UTF16LE_BOM);
                for unit in content.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                fs::write(path, bytes)
                    .with_context(|| format!("Failed to write to file: {:?}", path))
            }
        }
    }
}
