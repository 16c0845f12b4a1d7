/// Battle session orchestrator.
///
/// Pure state machine — no IO. The caller renders the current matchup,
/// reports which song won, and the session applies the rating update,
/// advances the scheduler, and settles the final ranking once the target
/// number of votes has been cast. Each session owns its pool, ratings, and
/// recency state exclusively; abandoning it just drops the value.
use std::collections::HashSet;

use crate::constants::{COMPARISONS_PER_SONG, DEFAULT_K_FACTOR, INITIAL_RATING};
use crate::elo::calculate_elo;
use crate::error::SessionError;
use crate::scheduler::PairScheduler;
use crate::share;
use crate::types::{Pair, Song};

/// What a submitted vote produced: the next matchup, or the settled ranking.
#[derive(Debug)]
pub enum VoteResult {
    /// Still battling; render this matchup next.
    Next(Pair),
    /// The session just finished. Songs are sorted by rating descending
    /// (ties keep pool order) and the token encodes that exact order.
    Finished {
        ranking: Vec<Song>,
        share_token: String,
    },
}

#[derive(Debug)]
pub struct RankingSession {
    songs: Vec<Song>,
    scheduler: PairScheduler,
    current_pair: Pair,
    /// Votes resolved so far.
    resolved: usize,
    /// Votes needed to finish, fixed at start.
    target: usize,
    /// The settled ranking. `Some` is the terminal state — no vote is
    /// accepted and no new pair is drawn once this is set.
    ranking: Option<Vec<Song>>,
    share_token: Option<String>,
}

impl RankingSession {
    /// Start a battle over `songs`.
    ///
    /// Every rating is reset to the baseline, the vote target is fixed at
    /// four battles per song, and the first matchup is drawn immediately.
    /// Fails if the pool has fewer than two songs or a duplicate ID.
    pub fn start(mut songs: Vec<Song>) -> Result<Self, SessionError> {
        if songs.len() < 2 {
            return Err(SessionError::InvalidPoolSize { size: songs.len() });
        }

        {
            let mut seen = HashSet::new();
            for song in &songs {
                if !seen.insert(song.id.as_str()) {
                    return Err(SessionError::DuplicateSongId(song.id.clone()));
                }
            }
        }

        for song in &mut songs {
            song.elo = INITIAL_RATING;
        }

        let target = songs.len() * COMPARISONS_PER_SONG;
        let mut scheduler = PairScheduler::new();
        let current_pair = scheduler.select_next(&songs);

        Ok(RankingSession {
            songs,
            scheduler,
            current_pair,
            resolved: 0,
            target,
            ranking: None,
            share_token: None,
        })
    }

    /// Whether the ranking has settled.
    pub fn is_finished(&self) -> bool {
        self.ranking.is_some()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved
    }

    pub fn target_count(&self) -> usize {
        self.target
    }

    /// The pool with live ratings, in original order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// The matchup awaiting a vote. Wrong-state once the session finished.
    pub fn current_pair(&self) -> Result<(&Song, &Song), SessionError> {
        if self.is_finished() {
            return Err(SessionError::InvalidStateTransition(
                "no matchup to show: the session is finished",
            ));
        }
        let (i, j) = self.current_pair;
        Ok((&self.songs[i], &self.songs[j]))
    }

    /// Apply one vote: `winner_id` beat `loser_id`.
    ///
    /// Updates both ratings, then either draws the next matchup or — once
    /// the vote target is reached — settles the ranking, encodes its share
    /// token, and transitions to the terminal state.
    pub fn submit_outcome(
        &mut self,
        winner_id: &str,
        loser_id: &str,
    ) -> Result<VoteResult, SessionError> {
        if self.is_finished() {
            return Err(SessionError::InvalidStateTransition(
                "vote submitted after the session finished",
            ));
        }

        let winner_idx = self.index_of(winner_id)?;
        let loser_idx = self.index_of(loser_id)?;

        let update = calculate_elo(
            self.songs[winner_idx].elo,
            self.songs[loser_idx].elo,
            DEFAULT_K_FACTOR,
        );
        self.songs[winner_idx].elo = update.winner;
        self.songs[loser_idx].elo = update.loser;
        self.resolved += 1;

        if self.resolved >= self.target {
            let mut ranked = self.songs.clone();
            // Stable sort: equal ratings keep their pool order.
            ranked.sort_by(|a, b| b.elo.cmp(&a.elo));
            let token = share::encode(&ranked);

            self.ranking = Some(ranked.clone());
            self.share_token = Some(token.clone());
            return Ok(VoteResult::Finished {
                ranking: ranked,
                share_token: token,
            });
        }

        self.current_pair = self.scheduler.select_next(&self.songs);
        Ok(VoteResult::Next(self.current_pair))
    }

    /// The settled ranking, rating descending. Wrong-state while battling.
    pub fn ranking(&self) -> Result<&[Song], SessionError> {
        self.ranking.as_deref().ok_or(SessionError::InvalidStateTransition(
            "ranking requested while the battle is still running",
        ))
    }

    /// The share token for the settled ranking. Wrong-state while battling.
    pub fn share_token(&self) -> Result<&str, SessionError> {
        self.share_token.as_deref().ok_or(SessionError::InvalidStateTransition(
            "share token requested while the battle is still running",
        ))
    }

    fn index_of(&self, id: &str) -> Result<usize, SessionError> {
        self.songs
            .iter()
            .position(|song| song.id == id)
            .ok_or_else(|| SessionError::UnknownSongId(id.to_string()))
    }
}
