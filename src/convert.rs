//! External converter collaborator
//!
//! The texture converter is a black-box executable taking `(source, dest)`
//! positionally. It is abstracted behind a trait so the engine can be tested
//! without spawning a real subprocess.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{PaverError, PaverResult};

/// Default converter program, resolved via `PATH`.
///
/// The stock tool ships with the DayZ Tools bundle; point `--converter` at
/// `ImageToPAA.exe` there if it is not on the path.
pub const DEFAULT_CONVERTER: &str = "ImageToPAA";

/// Capability interface for the image-to-texture conversion
pub trait Converter {
    /// Convert `src` into `dst`. The caller creates `dst`'s parent
    /// directories; the converter only writes the file.
    fn convert(&self, src: &Path, dst: &Path) -> PaverResult<()>;
}

/// Converter backed by an external executable
#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: PathBuf,
}

impl CommandConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Converter for CommandConverter {
    fn convert(&self, src: &Path, dst: &Path) -> PaverResult<()> {
        let output = Command::new(&self.program)
            .arg(src)
            .arg(dst)
            .output()
            .map_err(|source| PaverError::ConverterLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(PaverError::ConverterFailed {
                path: src.to_path_buf(),
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(())
    }
}
