/// Rating assigned to every song when a battle session starts.
/// All songs begin equal; only battle outcomes move them apart.
pub const INITIAL_RATING: i32 = 1000;

/// Elo K-factor: how far a single battle outcome moves a rating.
/// Larger values converge faster but stay more volatile.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Battles per song. A session over N songs runs N * COMPARISONS_PER_SONG
/// votes before the ranking is considered settled, so each song takes part
/// in roughly eight battles on average.
pub const COMPARISONS_PER_SONG: usize = 4;

/// Upper bound on the set of recently-battled pairs. Once full, the
/// oldest-inserted pair key is evicted first (insertion order, not access
/// order), making that matchup eligible again.
pub const MAX_RECENT_PAIRS: usize = 25;

/// A song is on cooldown while it sits among the last SONG_COOLDOWN entries
/// of the recent-song sequence, keeping it out of back-to-back battles.
pub const SONG_COOLDOWN: usize = 3;

/// How many recent song appearances to remember. The sequence is trimmed to
/// this length after every recorded pair; only the last SONG_COOLDOWN
/// entries matter for cooldown checks, the rest is slack.
pub const RECENT_SONG_MEMORY: usize = SONG_COOLDOWN * 10;

/// Attempts at drawing a pair that passes the recency filters before the
/// scheduler gives up and takes any two distinct songs. With a pool of two
/// or three songs the filters reject almost everything, so the fallback is
/// the steady state there.
pub const MAX_PAIR_ATTEMPTS: usize = 200;
