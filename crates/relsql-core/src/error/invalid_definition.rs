use super::Error;

/// Error when a model definition or migration delta cannot be interpreted.
#[derive(Debug)]
pub(super) struct InvalidDefinitionError {
    message: Box<str>,
}

impl std::error::Error for InvalidDefinitionError {}

impl core::fmt::Display for InvalidDefinitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid definition: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid definition error.
    pub fn invalid_definition(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidDefinition(InvalidDefinitionError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid definition error.
    pub fn is_invalid_definition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidDefinition(_))
    }
}
