use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): command completed
/// - `Failure` (1): command completed and reported a problem (invalid locale
///   tags, config file already present)
/// - `Error` (2): command failed (invalid arguments, tool failure, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
