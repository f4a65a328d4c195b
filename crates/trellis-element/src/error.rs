use thiserror::Error;
use trellis_dom::DomError;

#[derive(Debug, Error)]
pub enum ElementError {
    #[error("tag `{0}` is already defined")]
    DuplicateTag(String),
    #[error("tag `{0}` is not defined")]
    UnknownTag(String),
    #[error("no instance for this node")]
    MissingInstance,
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// What a lifecycle hook may fail with. The runtime reports and swallows
/// these; they never cross back into the platform callback.
pub type HookError = Box<dyn std::error::Error>;
