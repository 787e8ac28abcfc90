//! Interactive prompts for the `add` flow
//!
//! [`UserInput`] hides the prompt backend so the add flow can be driven by
//! scripted answers in tests. [`DialoguerInput`] is the terminal backend.

use std::io;

/// Prompts used while creating a snippet
///
/// Every method returns `Ok(None)` when the user cancels the prompt.
///
/// # Examples
///
/// ```no_run
/// use zeno::ui::input::{DialoguerInput, UserInput};
///
/// let input = DialoguerInput::new();
/// if let Some(title) = input.prompt_text("Title", None, false).unwrap() {
///     println!("Adding {title}");
/// }
/// ```
pub trait UserInput: Send + Sync {
    /// Prompt for a single line of text
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the terminal cannot be read.
    fn prompt_text(
        &self,
        prompt: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>>;

    /// Pick one entry of `items`; returns its index
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the terminal cannot be read.
    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>>;

    /// Open `$EDITOR` on `initial`; `None` when the file was not saved
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the editor cannot be launched.
    fn prompt_editor(&self, initial: &str) -> Result<Option<String>>;
}

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Input cancelled by user")]
    Cancelled,

    #[error("Invalid input: {0}")]
    Invalid(String),
}

fn io_error(e: dialoguer::Error) -> InputError {
    InputError::Io(io::Error::other(e))
}

/// Terminal prompts using dialoguer
pub struct DialoguerInput {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for DialoguerInput {
    fn prompt_text(
        &self,
        prompt: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> Result<Option<String>> {
        use dialoguer::Input;

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty);

        if let Some(def) = default {
            input = input.default(def.to_string());
        }

        input.interact_text().map(Some).map_err(io_error)
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        use dialoguer::Select;

        let mut select = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items);

        if let Some(def) = default {
            select = select.default(def);
        }

        select.interact_opt().map_err(io_error)
    }

    fn prompt_editor(&self, initial: &str) -> Result<Option<String>> {
        dialoguer::Editor::new()
            .extension(".txt")
            .edit(initial)
            .map_err(io_error)
    }
}
