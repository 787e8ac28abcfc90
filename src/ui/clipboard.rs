//! Output sinks for the snippet picked in the browser
//!
//! The session hands the selected code to an [`OutputSink`]. The default
//! sink is the system clipboard (via `arboard`); `zeno search --print`
//! uses [`StdoutSink`] instead, which holds the text until the terminal
//! has been restored so it does not end up on the alternate screen.
//!
//! On Linux the clipboard only holds text while its owner is running. Before
//! zeno exits, [`ClipboardSink::hand_off`] starts a detached `zeno
//! serve-clipboard` that takes over the last copied text and keeps it
//! available until another program claims the clipboard.

use std::io::{Read, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Hidden subcommand run by [`ClipboardSink::hand_off`]
pub const SERVE_COMMAND: &str = "serve-clipboard";

/// Failure to deliver text to a sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// The clipboard could not be opened or written
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// Writing to stdout failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for the chosen snippet's code
pub trait OutputSink {
    /// # Errors
    ///
    /// Returns `SinkError` if the text could not be delivered.
    fn write(&mut self, text: &str) -> Result<(), SinkError>;
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        (**self).write(text)
    }
}

/// Where the code of a new snippet can be read from
pub trait TextSource {
    /// # Errors
    ///
    /// Returns `SinkError` if the source cannot be read.
    fn read_text(&mut self) -> Result<String, SinkError>;
}

/// Copies text to the system clipboard
///
/// The clipboard handle is created on first use and reused for every copy.
#[derive(Default)]
pub struct ClipboardSink {
    clipboard: Option<arboard::Clipboard>,
    last: Option<String>,
}

impl ClipboardSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, SinkError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        Ok(self.clipboard.insert(clipboard))
    }

    /// Text of the last successful copy
    #[must_use]
    pub fn last_copied(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Keep the last copied text on the clipboard after the process exits
    ///
    /// Does nothing when nothing was copied, or on platforms where the
    /// clipboard outlives its owner.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the helper process cannot be started or fed.
    pub fn hand_off(&mut self) -> Result<(), SinkError> {
        let Some(text) = self.last.take() else {
            return Ok(());
        };
        if !cfg!(target_os = "linux") {
            return Ok(());
        }

        let mut child = serve_command(&std::env::current_exe()?).spawn()?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("clipboard helper has no stdin"))?;
        stdin.write_all(text.as_bytes())?;
        drop(stdin);

        // The helper owns the selection from here on
        self.clipboard = None;
        tracing::debug!(pid = child.id(), "clipboard handed off");
        Ok(())
    }
}

/// Command line of the detached clipboard helper
fn serve_command(exe: &std::path::Path) -> Command {
    let mut command = Command::new(exe);
    command
        .arg(SERVE_COMMAND)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // Own process group, so closing the terminal's job does not take it down
        command.process_group(0);
    }
    command
}

/// Put stdin on the clipboard and block until another program takes it over
///
/// # Errors
///
/// Returns `SinkError` if stdin cannot be read or the clipboard is unavailable.
pub fn serve_stdin() -> Result<(), SinkError> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    serve(&text)
}

#[cfg(target_os = "linux")]
fn serve(text: &str) -> Result<(), SinkError> {
    use arboard::SetExtLinux;

    arboard::Clipboard::new()?.set().wait().text(text)?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn serve(text: &str) -> Result<(), SinkError> {
    arboard::Clipboard::new()?.set_text(text)?;
    Ok(())
}

impl OutputSink for ClipboardSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        self.handle()?.set_text(text)?;
        self.last = Some(text.to_string());
        Ok(())
    }
}

impl TextSource for ClipboardSink {
    fn read_text(&mut self) -> Result<String, SinkError> {
        Ok(self.handle()?.get_text()?)
    }
}

/// Holds the text for printing once the TUI has exited
#[derive(Debug, Default)]
pub struct StdoutSink {
    pending: Option<String>,
}

impl StdoutSink {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Print the held text, if any
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if stdout cannot be written.
    pub fn flush_to_stdout(&mut self) -> Result<(), SinkError> {
        if let Some(text) = self.pending.take() {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }
}

impl OutputSink for StdoutSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        self.pending = Some(text.to_string());
        Ok(())
    }
}
