/// discduel-core: Pure-computation song battle engine.
///
/// Repeated pairwise votes → Elo ratings → ranked list with a shareable
/// token. No IO, no HTTP, no filesystem — bring your own song catalog and
/// your own UI.
///
/// Songs are identified by caller-provided string IDs, unique within a
/// session. The engine keeps matchups fresh (no immediate pair or song
/// repeats) and settles the ranking after four votes per song.
///
/// # Quick start
///
/// ```rust
/// use discduel_core::{RankingSession, Song, VoteResult};
///
/// let songs = vec![
///     Song::new("t1", "Opener", "The Album"),
///     Song::new("t2", "Deep Cut", "The Album"),
///     Song::new("t3", "Closer", "The Album"),
/// ];
///
/// let mut session = RankingSession::start(songs).unwrap();
/// while !session.is_finished() {
///     let (left, right) = session.current_pair().unwrap();
///     // Ask the user; here the left song always wins.
///     let (winner, loser) = (left.id.clone(), right.id.clone());
///     session.submit_outcome(&winner, &loser).unwrap();
/// }
///
/// for (place, song) in session.ranking().unwrap().iter().enumerate() {
///     println!("{}. {} ({})", place + 1, song.name, song.elo);
/// }
/// println!("share: /s/{}", session.share_token().unwrap());
/// ```

pub mod constants;
pub mod elo;
pub mod error;
pub mod recency;
pub mod scheduler;
pub mod session;
pub mod share;
pub mod types;

// Re-export primary public API at crate root.
pub use elo::{calculate_elo, EloUpdate};
pub use error::{DecodeError, SessionError};
pub use recency::{pair_key, RecencyTracker};
pub use scheduler::PairScheduler;
pub use session::{RankingSession, VoteResult};
pub use share::SharedSong;
pub use types::{Pair, Song};
