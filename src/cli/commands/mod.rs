//! Command implementations for studybuddy.
//!
//! Every command returns the text to print; `main` does the printing.

mod config;
mod focus;

pub use config::config;
pub use focus::{clear, history, report, start};

use crate::cli::args::OutputFormat;
use crate::cli::completions::{
    completion_install_instructions, generate_completions, shell_from_str,
};
use crate::error::StudyBuddyError;

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the shell name is not recognized.
pub fn completions(shell: &str, install: bool) -> Result<String, StudyBuddyError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        StudyBuddyError::InvalidInput(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}

/// Resolve the output format: the flag wins over the configured default.
#[must_use]
pub fn effective_format(flag: Option<OutputFormat>, configured: OutputFormat) -> OutputFormat {
    flag.unwrap_or(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_unknown_shell() {
        let err = completions("tcsh", false).unwrap_err();
        assert!(err.to_string().contains("Unknown shell: tcsh"));
    }

    #[test]
    fn test_completions_install_instructions() {
        let text = completions("zsh", true).unwrap();
        assert!(text.contains("compinit"));
    }

    #[test]
    fn test_effective_format() {
        assert_eq!(
            effective_format(None, OutputFormat::Json),
            OutputFormat::Json
        );
        assert_eq!(
            effective_format(Some(OutputFormat::Pretty), OutputFormat::Json),
            OutputFormat::Pretty
        );
    }
}
