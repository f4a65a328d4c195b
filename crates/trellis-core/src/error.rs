use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("empty path")]
    EmptyPath,
    #[error("array segment requires a numeric index, got `{segment}`")]
    IndexExpected { segment: String },
    #[error("segment `{segment}` is not a container")]
    NotAContainer { segment: String },
}

#[derive(Debug, Error)]
pub enum BindError {
    #[error("empty attribute name")]
    EmptyKey,
    #[error(transparent)]
    Store(#[from] StoreError),
}
