/// Error types for the image input widget
///
/// `InputError` covers everything the user can trigger from the surface.
/// Its `Display` text is what the inline error message shows.
/// `BindingError` covers misuse of the binding protocol by the host.

use thiserror::Error;

use crate::binding::ElementId;

/// Which of the two file-count checks rejected a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooMany {
    /// More than one candidate before filtering by media type
    Candidates,
    /// More than one image left after filtering
    Images,
}

impl TooMany {
    fn message(&self) -> &'static str {
        match self {
            TooMany::Candidates => "Multiple files not allowed. Please select only one image.",
            TooMany::Images => "Please select only one image.",
        }
    }
}

/// User-recoverable pipeline failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{}", .0.message())]
    TooManyFiles(TooMany),

    #[error("Please select valid image files.")]
    NoValidImages,

    /// Reading a file failed; `reason` only goes to the log
    #[error("Error processing image file(s).")]
    Decode { name: String, reason: String },
}

impl InputError {
    pub fn decode(name: impl Into<String>, reason: impl ToString) -> Self {
        InputError::Decode {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failures of binding protocol calls
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("no image input with id `{0}`")]
    UnknownElement(ElementId),

    #[error("an image input with id `{0}` is already mounted")]
    DuplicateElement(ElementId),

    #[error("a binding named `{0}` is already registered")]
    DuplicateBinding(String),

    #[error("invalid value for `{element}`: {source}")]
    InvalidValue {
        element: ElementId,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures loading widget configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate widget id `{0}` in config")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            InputError::TooManyFiles(TooMany::Candidates).to_string(),
            "Multiple files not allowed. Please select only one image."
        );
        assert_eq!(
            InputError::TooManyFiles(TooMany::Images).to_string(),
            "Please select only one image."
        );
        assert_eq!(
            InputError::NoValidImages.to_string(),
            "Please select valid image files."
        );
    }

    #[test]
    fn test_decode_message_hides_reason() {
        let err = InputError::decode("cat.png", "permission denied");
        assert_eq!(err.to_string(), "Error processing image file(s).");
    }
}
