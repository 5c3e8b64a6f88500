use super::text::{append_line, copy_truncating};

/// Most notes the store will hold.
pub const MAX_NOTES: usize = 10;
/// Title record size; one byte is reserved, so titles hold 31 bytes.
pub const TITLE_CAPACITY: usize = 32;
/// Content record size; one byte is reserved, so content holds 1023 bytes.
pub const CONTENT_CAPACITY: usize = 1024;

/// A titled block of plain text. The title doubles as its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    content: String,
}

impl Note {
    /// Create an empty note, truncating the title to its record size.
    pub fn new(title: &str) -> Self {
        Self {
            title: copy_truncating(TITLE_CAPACITY, title),
            content: String::new(),
        }
    }

    /// Rebuild a note from stored text, truncating both fields.
    pub fn with_content(title: &str, content: &str) -> Self {
        Self {
            title: copy_truncating(TITLE_CAPACITY, title),
            content: copy_truncating(CONTENT_CAPACITY, content),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Add a line to the body. Returns `false` once the body is full.
    pub fn append_line(&mut self, text: &str) -> bool {
        append_line(&mut self.content, CONTENT_CAPACITY, text)
    }
}
