//! Statement file intake: validation, hashing and page text extraction.

use std::path::Path;

use anyhow::{bail, Context, Result};
use passbook_core::InputConfig;
use passbook_extract::LineScanner;
use sha2::{Digest, Sha256};

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Text,
}

impl SourceKind {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" => Some(SourceKind::Text),
            _ => None,
        }
    }
}

/// A validated statement file held in memory.
#[derive(Debug)]
pub struct StatementSource {
    pub file_name: String,
    pub kind: SourceKind,
    bytes: Vec<u8>,
}

impl StatementSource {
    /// Reads `path` after checking its extension and size, and for PDFs the
    /// `%PDF` header.
    pub fn load(path: &Path, limits: &InputConfig) -> Result<Self> {
        let Some(kind) = SourceKind::from_path(path) else {
            bail!("Only PDF or TXT statements are supported: {}", path.display());
        };

        let size = std::fs::metadata(path)
            .with_context(|| format!("reading metadata of {}", path.display()))?
            .len();
        if size > limits.max_file_bytes {
            bail!(
                "{} is {size} bytes, the limit is {} bytes",
                path.display(),
                limits.max_file_bytes
            );
        }

        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        if kind == SourceKind::Pdf && !bytes.starts_with(PDF_MAGIC) {
            bail!("{} is not a valid PDF file", path.display());
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!(file = %file_name, bytes = bytes.len(), ?kind, "loaded statement");
        Ok(Self { file_name, kind, bytes })
    }

    /// Lowercase hex SHA-256 of the file contents.
    pub fn sha256_hex(&self) -> String {
        let digest: [u8; 32] = Sha256::digest(&self.bytes).into();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Page texts in document order. PDFs are extracted page by page; text
    /// files are split on form feeds.
    pub fn pages(&self) -> Result<Vec<String>> {
        let pages = match self.kind {
            SourceKind::Pdf => pdf_extract::extract_text_from_mem_by_pages(&self.bytes)
                .with_context(|| format!("extracting text from {}", self.file_name))?,
            SourceKind::Text => {
                let text = std::str::from_utf8(&self.bytes)
                    .with_context(|| format!("{} is not valid UTF-8", self.file_name))?;
                LineScanner::split_pages(text).into_iter().map(str::to_string).collect()
            }
        };
        tracing::debug!(pages = pages.len(), "split statement text");
        Ok(pages)
    }
}
