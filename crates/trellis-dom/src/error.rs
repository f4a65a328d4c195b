use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("malformed markup: {detail}")]
    Malformed { detail: String },
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },
    #[error("node is gone")]
    MissingNode,
    #[error("node is not an element")]
    NotAnElement,
}
