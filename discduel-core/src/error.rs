/// Error types for the battle engine.
///
/// Session errors are contract violations by the caller and fail fast;
/// `DecodeError` is the one error produced from untrusted input (a share
/// token someone pasted) and is always recoverable.
use thiserror::Error;

/// Caller-misuse errors raised by [`crate::session::RankingSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A battle needs at least two songs.
    #[error("a battle needs at least 2 songs, got {size}")]
    InvalidPoolSize { size: usize },

    /// Song IDs must be unique within a session.
    #[error("duplicate song ID in the pool: \"{0}\"")]
    DuplicateSongId(String),

    /// A vote referenced a song that is not in the pool.
    #[error("song \"{0}\" is not in the battle pool")]
    UnknownSongId(String),

    /// An operation was attempted in the wrong session state, like voting
    /// after the ranking is settled or reading the ranking mid-battle.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(&'static str),
}

/// A share token that could not be decoded back into a ranking.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("share token payload is not a ranking: {0}")]
    Payload(#[from] serde_json::Error),
}
