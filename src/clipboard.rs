//! Clipboard capabilities.
//!
//! The coordinator only sees the [`Clipboard`] trait: a primary text write and
//! a legacy copy command that copies whatever is currently selected in the
//! document. Backends decide what either of those means on their platform.

use crate::error::ClipboardError;

pub trait Clipboard {
    /// Primary path: write `text` straight to the clipboard.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Legacy path: run the platform copy command on the current selection.
    fn exec_copy(&mut self, selection: Option<&str>) -> Result<(), ClipboardError>;
}

/// System clipboard backed by `arboard`.
///
/// The legacy copy command is queued rather than executed: the hosting shell
/// picks it up with [`SystemClipboard::take_copy_command`] and hands it to its
/// windowing layer, which owns the platform copy command.
pub struct SystemClipboard {
    board: Option<arboard::Clipboard>,
    copy_command: Option<String>,
}

impl SystemClipboard {
    /// Opens the system clipboard. A missing clipboard is not an error here;
    /// writes fail later and the coordinator falls back to the copy command.
    pub fn new() -> Self {
        let board = match arboard::Clipboard::new() {
            Ok(board) => Some(board),
            Err(e) => {
                tracing::warn!("system clipboard unavailable: {}", e);
                None
            }
        };
        Self {
            board,
            copy_command: None,
        }
    }

    /// Takes the text of a pending copy command, if one was issued.
    pub fn take_copy_command(&mut self) -> Option<String> {
        self.copy_command.take()
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let board = self
            .board
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("no system clipboard".to_string()))?;
        board
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))?;
        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }

    fn exec_copy(&mut self, selection: Option<&str>) -> Result<(), ClipboardError> {
        let text = selection.ok_or(ClipboardError::NothingSelected)?;
        self.copy_command = Some(text.to_string());
        Ok(())
    }
}

/// In-memory clipboard with switchable capabilities, for headless use and
/// tests.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    primary_supported: bool,
    legacy_supported: bool,
    contents: Option<String>,
    primary_writes: usize,
    legacy_copies: usize,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryClipboard {
    /// A clipboard supporting both paths.
    pub fn new() -> Self {
        Self {
            primary_supported: true,
            legacy_supported: true,
            contents: None,
            primary_writes: 0,
            legacy_copies: 0,
        }
    }

    /// A context without the clipboard API: only the copy command works.
    pub fn legacy_only() -> Self {
        Self {
            primary_supported: false,
            ..Self::new()
        }
    }

    /// A context where nothing can be copied.
    pub fn unsupported() -> Self {
        Self {
            primary_supported: false,
            legacy_supported: false,
            ..Self::new()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn primary_writes(&self) -> usize {
        self.primary_writes
    }

    pub fn legacy_copies(&self) -> usize {
        self.legacy_copies
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.primary_supported {
            return Err(ClipboardError::Unavailable("clipboard API not supported".to_string()));
        }
        self.contents = Some(text.to_string());
        self.primary_writes += 1;
        Ok(())
    }

    fn exec_copy(&mut self, selection: Option<&str>) -> Result<(), ClipboardError> {
        if !self.legacy_supported {
            return Err(ClipboardError::Rejected("copy command not supported".to_string()));
        }
        let text = selection.ok_or(ClipboardError::NothingSelected)?;
        self.contents = Some(text.to_string());
        self.legacy_copies += 1;
        Ok(())
    }
}
