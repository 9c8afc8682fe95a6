//! Interactive yes/no confirmation
//!
//! One collaborator function: ask before destructive steps, with an override
//! flag (`--yes`) that answers for the user and says so.

use dialoguer::Confirm;

use crate::error::{PaverError, PaverResult};

/// Ask a yes/no question, defaulting to "no".
///
/// With `assume_yes` the prompt is echoed and auto-confirmed, matching
/// non-interactive/CI use.
pub fn confirm(assume_yes: bool, message: &str) -> PaverResult<bool> {
    if assume_yes {
        println!("{message} yes (--yes)");
        return Ok(true);
    }

    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|err| match err {
            dialoguer::Error::IO(io_err) => PaverError::Io(io_err),
        })
}
