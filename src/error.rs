use thiserror::Error;

/// Failures while turning a control-change event into new charts.
///
/// None of these stop the server; they are reported back to the page and the
/// previous charts stay on screen.
#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("no output depends on control '{0}'")]
    UnknownControl(String),

    #[error("invalid value for '{control}': {reason}")]
    InvalidValue { control: String, reason: String },

    #[error("view for '{output}' failed: {message}")]
    ViewFailed { output: String, message: String },
}
