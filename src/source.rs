//! Loads a source file into memory for scanning.
//!
//! The whole file is read up front as raw bytes; no encoding is checked. A
//! [`SourceFile`] owns the buffer and every scanner and token borrowed from it.

use std::{fs, io, path::Path, rc::Rc};

use thiserror::Error;
use tracing::debug;

use crate::lexer::lexer::Scanner;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unable to open {path}")]
    NotFound { path: String },
    #[error("error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    name: Rc<String>,
    text: Vec<u8>,
}

impl SourceFile {
    pub fn load(path: impl AsRef<Path>) -> Result<SourceFile, LoadError> {
        let path = path.as_ref();
        let path_name = path.display().to_string();

        let text = fs::read(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: path_name.clone(),
            },
            _ => LoadError::Io {
                path: path_name.clone(),
                source: error,
            },
        })?;

        debug!(path = %path_name, bytes = text.len(), "loaded source");

        Ok(SourceFile::from_bytes(path_name, text))
    }

    /// Wraps an in-memory buffer. `&str`, `String`, `&[u8]` and `Vec<u8>`
    /// all work.
    pub fn from_bytes(name: impl Into<String>, text: impl Into<Vec<u8>>) -> SourceFile {
        SourceFile {
            name: Rc::new(name.into()),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// A fresh scanner over this file's text.
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.text, Some(self.name.to_string()))
    }
}
