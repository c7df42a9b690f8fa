use thiserror::Error;

/// Error taxonomy for talking to the graph server and rendering its replies.
///
/// - `Network`: transport-level failure; shown as an inline error panel.
/// - `Malformed`: the response decoded but a payload had the wrong shape;
///   the view degrades to a header-only render.
/// - `Schema`: a relation index outside the closed 7-member taxonomy;
///   fatal for the panel being built, never partially drawn.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BrowseError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("relation index {0} outside the 7-member taxonomy")]
    Schema(i64),
}
