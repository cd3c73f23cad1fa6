//! Copying text to the system clipboard through the terminal.

use std::fmt;
use std::io::{self, Write};

use crossterm::{clipboard::CopyToClipboard, execute};
use tracing::{debug, instrument};

/// Where copied text goes.
pub trait Clipboard: fmt::Debug + Send {
    /// Places `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the underlying write.
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// Clipboard reached with the OSC 52 escape sequence written to `out`.
///
/// The terminal emulator, not this process, owns the clipboard; terminals
/// without OSC 52 support ignore the sequence.
#[derive(Debug)]
pub struct TerminalClipboard<W> {
    out: W,
}

impl<W: Write> TerminalClipboard<W> {
    /// Clipboard writing its escape sequences to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// The underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalClipboard<io::Stdout> {
    /// Clipboard of the terminal on stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + fmt::Debug + Send> Clipboard for TerminalClipboard<W> {
    #[instrument(skip(self, text), fields(len = text.len()))]
    fn copy(&mut self, text: &str) -> io::Result<()> {
        execute!(self.out, CopyToClipboard::to_clipboard_from(text))?;
        debug!("Text sent to the clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_osc52_sequence() {
        let mut clipboard = TerminalClipboard::new(Vec::new());
        clipboard
            .copy("https://kennygames.app/j/abc234")
            .expect("write to memory");
        let written = String::from_utf8(clipboard.into_inner()).expect("ascii");
        assert_eq!(
            written,
            "\x1b]52;c;aHR0cHM6Ly9rZW5ueWdhbWVzLmFwcC9qL2FiYzIzNA==\x1b\\"
        );
    }
}
