use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::model::note::{CONTENT_CAPACITY, Note};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot create notes directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write note {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("title {0:?} is not a plain file name")]
    UnsafeTitle(String),
}

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Whether `title` can be used as a file name directly inside the notes
/// directory without reaching anywhere else, on any platform.
pub fn is_safe_title(title: &str) -> bool {
    if title.is_empty() || title.contains(['/', '\\', ':', '\0']) {
        return false;
    }

    let stem = title.split('.').next().unwrap_or(title).trim_end();
    if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(stem)) {
        return false;
    }

    let mut components = Path::new(title).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == title
    )
}

/// The notes directory: one regular file per note, named by its title.
#[derive(Debug, Clone)]
pub struct NoteDir {
    root: PathBuf,
}

impl NoteDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it is missing. Safe to call repeatedly.
    pub fn ensure(&self) -> Result<(), PersistError> {
        fs::create_dir_all(&self.root).map_err(|source| PersistError::CreateDir {
            path: self.root.clone(),
            source,
        })
    }

    /// Read up to `limit` notes in directory listing order.
    ///
    /// Only regular files count. Subdirectories, symlinks and files that
    /// cannot be read are skipped, and anything past `limit` is left alone.
    pub fn load_all(&self, limit: usize) -> Vec<Note> {
        if let Err(err) = self.ensure() {
            tracing::warn!("{err}");
        }

        let mut notes = Vec::with_capacity(limit);
        let mut skipped = 0usize;

        let entries = WalkBuilder::new(&self.root)
            .max_depth(Some(1))
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .build()
            .flatten()
            .filter(|entry| entry.depth() == 1);

        for entry in entries {
            if notes.len() >= limit {
                break;
            }

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                skipped += 1;
                tracing::warn!(
                    "skipping note with non-UTF-8 file name {}",
                    entry.path().display()
                );
                continue;
            };

            match read_prefix(entry.path(), CONTENT_CAPACITY - 1) {
                Ok(content) => notes.push(Note::with_content(name, &content)),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!("skipping unreadable note {}: {err}", entry.path().display());
                }
            }
        }

        tracing::info!(
            loaded = notes.len(),
            skipped,
            dir = %self.root().display(),
            "notes loaded"
        );
        notes
    }

    /// Replace the file for `title` with `content`.
    pub fn save(&self, title: &str, content: &str) -> Result<(), PersistError> {
        if !is_safe_title(title) {
            return Err(PersistError::UnsafeTitle(title.to_string()));
        }

        self.ensure()?;

        let path = self.root.join(title);
        let write = || -> io::Result<()> {
            let mut file = File::create(&path)?;
            if !content.is_empty() {
                file.write_all(content.as_bytes())?;
            }
            Ok(())
        };

        write().map_err(|source| PersistError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(bytes = content.len(), path = %path.display(), "note saved");
        Ok(())
    }
}

fn read_prefix(path: &Path, max_bytes: usize) -> io::Result<String> {
    let file = File::open(path)?;
    let mut bytes = Vec::with_capacity(max_bytes);
    file.take(max_bytes as u64).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
