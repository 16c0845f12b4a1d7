/// Core data types for the battle engine.
///
/// Songs are identified by caller-provided string IDs, unique within a
/// session. All display metadata is opaque pass-through — the engine never
/// interprets names, album titles, or image URLs.
use serde::{Deserialize, Serialize};

use crate::constants::INITIAL_RATING;

fn initial_rating() -> i32 {
    INITIAL_RATING
}

/// A song in the battle pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Unique ID within the session (a Spotify track ID when the pool comes
    /// from the catalog, but any unique string works).
    pub id: String,
    pub name: String,
    /// Album or collection the song belongs to.
    pub album: String,
    /// Cover image URL, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// 30-second preview clip URL, if the catalog provides one.
    #[serde(default)]
    pub preview_url: Option<String>,
    /// Contributing artist names.
    #[serde(default)]
    pub artists: Vec<String>,
    /// Current Elo rating. Reset to the baseline at session start; mutated
    /// only by the rating update after a resolved battle.
    #[serde(default = "initial_rating")]
    pub elo: i32,
}

impl Song {
    /// A song with the baseline rating and no optional metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>, album: impl Into<String>) -> Self {
        Song {
            id: id.into(),
            name: name.into(),
            album: album.into(),
            image: None,
            preview_url: None,
            artists: Vec::new(),
            elo: INITIAL_RATING,
        }
    }
}

/// A matchup: two distinct indices into the session's song pool.
pub type Pair = (usize, usize);
