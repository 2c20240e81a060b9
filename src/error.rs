use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command line or path, detected before any model work.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("malformed token {token:?} at line {line}: expected word_TAG")]
    MalformedToken { line: usize, token: String },

    #[error("cannot build a model from an empty training corpus")]
    EmptyCorpus,

    /// Predicted and gold sequences differ in length. This is a decoder bug, not bad input.
    #[error("length mismatch: {predicted} predicted tags vs {gold} gold tags")]
    LengthMismatch { predicted: usize, gold: usize },

    #[error("failed to write json report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
