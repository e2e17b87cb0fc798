use super::Error;

/// A model operation failed before or after talking to the database.
///
/// Carries the model name and a reason. Callers distinguish the expected
/// cases through the `is_*` predicates on [`Error`].
#[derive(Debug)]
pub(super) struct ModelError {
    model: Box<str>,
    reason: Reason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Reason {
    NothingToUpdate,
    NothingToDelete,
    MoreThanOneRetrieved,
    NoneRetrieved,
}

impl Reason {
    fn as_str(self) -> &'static str {
        match self {
            Reason::NothingToUpdate => "nothing to update from",
            Reason::NothingToDelete => "nothing to delete from",
            Reason::MoreThanOneRetrieved => "more than one retrieved",
            Reason::NoneRetrieved => "none retrieved",
        }
    }
}

impl std::error::Error for ModelError {}

impl core::fmt::Display for ModelError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: {}", self.model, self.reason.as_str())
    }
}

impl Error {
    fn model(model: &str, reason: Reason) -> Error {
        Error::from(super::ErrorKind::Model(ModelError {
            model: model.into(),
            reason,
        }))
    }

    /// Neither a filter-bound retrieved state nor an identified row exists.
    pub fn nothing_to_update(model: &str) -> Error {
        Error::model(model, Reason::NothingToUpdate)
    }

    /// Neither a filter-bound retrieved state nor an identified row exists.
    pub fn nothing_to_delete(model: &str) -> Error {
        Error::model(model, Reason::NothingToDelete)
    }

    /// Single-result retrieval matched multiple rows.
    pub fn more_than_one_retrieved(model: &str) -> Error {
        Error::model(model, Reason::MoreThanOneRetrieved)
    }

    /// Strict single-result retrieval matched no rows.
    pub fn none_retrieved(model: &str) -> Error {
        Error::model(model, Reason::NoneRetrieved)
    }

    /// Returns `true` if this error is a model operation failure.
    pub fn is_model(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Model(_))
    }

    pub fn is_nothing_to_update(&self) -> bool {
        self.has_reason(Reason::NothingToUpdate)
    }

    pub fn is_nothing_to_delete(&self) -> bool {
        self.has_reason(Reason::NothingToDelete)
    }

    pub fn is_more_than_one_retrieved(&self) -> bool {
        self.has_reason(Reason::MoreThanOneRetrieved)
    }

    pub fn is_none_retrieved(&self) -> bool {
        self.has_reason(Reason::NoneRetrieved)
    }

    fn has_reason(&self, reason: Reason) -> bool {
        matches!(self.kind(), super::ErrorKind::Model(err) if err.reason == reason)
    }
}
