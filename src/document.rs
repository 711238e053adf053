//! Resume text extraction.
//!
//! Reads a single configured PDF and hands its text back to the agent. All
//! outcomes, including a missing or corrupt file, are ordinary tool output.

use crate::config::{DocumentSettings, Settings};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Extracted text shorter than this (after trimming) counts as empty.
const MIN_TEXT_CHARS: usize = 5;

/// Result of reading the resume.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    /// Extracted text, already cut to the configured prefix.
    Extracted(String),
    /// The file parsed but yielded (almost) no text.
    Empty,
    /// The file does not exist.
    NotFound { file_name: String, directory: String },
    /// Reading or parsing failed.
    Unreadable(String),
}

impl fmt::Display for DocumentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentOutcome::Extracted(text) => write!(
                f,
                "The following information was found in the user's resume: {}",
                text
            ),
            DocumentOutcome::Empty => {
                f.write_str("The resume file exists but appears to be empty or unreadable.")
            }
            DocumentOutcome::NotFound {
                file_name,
                directory,
            } => write!(
                f,
                "Error: I cannot find '{}'. Please ensure the file is in {}.",
                file_name, directory
            ),
            DocumentOutcome::Unreadable(reason) => write!(
                f,
                "Technical Error reading PDF: {}. Try re-saving your resume as a standard PDF.",
                reason
            ),
        }
    }
}

/// Join page texts in order, skipping blank pages, and keep at most
/// `max_chars` characters.
pub fn assemble_pages<I, S>(pages: I, max_chars: usize) -> DocumentOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text: String = pages
        .into_iter()
        .filter(|page| !page.as_ref().is_empty())
        .fold(String::new(), |mut acc, page| {
            acc.push_str(page.as_ref());
            acc
        });

    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return DocumentOutcome::Empty;
    }

    DocumentOutcome::Extracted(text.chars().take(max_chars).collect())
}

/// Reader for the configured resume file.
#[derive(Debug, Clone)]
pub struct ResumeReader {
    path: PathBuf,
    max_chars: usize,
    expected_dir: Option<String>,
}

impl ResumeReader {
    pub fn new(path: impl Into<PathBuf>, max_chars: usize) -> Self {
        Self {
            path: path.into(),
            max_chars,
            expected_dir: None,
        }
    }

    /// Build a reader from the `[document]` settings.
    pub fn from_settings(settings: &DocumentSettings) -> Self {
        Self {
            path: Settings::expand_path(&settings.path),
            max_chars: settings.max_chars,
            expected_dir: settings.expected_dir.clone(),
        }
    }

    /// Read the resume. The query only shows up in logs.
    #[instrument(skip(self))]
    pub fn read(&self, query: &str) -> DocumentOutcome {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Resume not found at {:?}", self.path);
                return self.not_found();
            }
            Err(e) => return DocumentOutcome::Unreadable(e.to_string()),
        };

        match extract_pages(&bytes) {
            Ok(pages) => {
                debug!("Extracted {} pages from {:?}", pages.len(), self.path);
                assemble_pages(pages, self.max_chars)
            }
            Err(reason) => {
                warn!("Failed to extract resume text: {}", reason);
                DocumentOutcome::Unreadable(reason)
            }
        }
    }

    fn not_found(&self) -> DocumentOutcome {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string());
        let directory = self
            .expected_dir
            .clone()
            .unwrap_or_else(|| display_dir(&self.path));

        DocumentOutcome::NotFound {
            file_name,
            directory,
        }
    }
}

/// Directory a path resolves into, relative paths against the working directory.
fn display_dir(path: &Path) -> String {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = match (parent, path.is_absolute()) {
        (Some(p), true) => p.to_path_buf(),
        (parent, _) => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            match parent {
                Some(p) => cwd.join(p),
                None => cwd,
            }
        }
    };
    dir.display().to_string()
}

fn extract_pages(bytes: &[u8]) -> std::result::Result<Vec<String>, String> {
    // pdf-extract can panic on malformed PDFs
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => {
            // the default panic hook has already written its message to stderr
            warn!("PDF extractor panicked; the panic message above came from it");
            Err("PDF extraction panicked (malformed file)".to_string())
        }
    }
}
