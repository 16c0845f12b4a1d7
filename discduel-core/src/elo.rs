/// Standard Elo rating update for a decided battle.
///
/// Pure function, no state. Ratings move by at most K points per battle and
/// expectations always sum to 1, so the winner never loses points and the
/// loser never gains any.

/// New ratings for both sides of a resolved battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EloUpdate {
    pub winner: i32,
    pub loser: i32,
}

/// Apply one battle outcome to the two ratings involved.
///
/// Expected score of the winner is `1 / (1 + 10^((loser - winner) / 400))`,
/// symmetrically for the loser. Results are rounded to the nearest integer
/// immediately (`f64::round`, half away from zero), matching how ratings
/// are stored between battles.
pub fn calculate_elo(winner: i32, loser: i32, k: f64) -> EloUpdate {
    let expected_winner = 1.0 / (1.0 + 10.0_f64.powf((loser - winner) as f64 / 400.0));
    let expected_loser = 1.0 / (1.0 + 10.0_f64.powf((winner - loser) as f64 / 400.0));

    let new_winner = winner as f64 + k * (1.0 - expected_winner);
    let new_loser = loser as f64 + k * (0.0 - expected_loser);

    EloUpdate {
        winner: new_winner.round() as i32,
        loser: new_loser.round() as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_K_FACTOR;

    #[test]
    fn test_even_matchup_splits_k() {
        // Equal ratings mean both expectations are 0.5, so each side moves
        // by exactly half of K.
        let update = calculate_elo(1000, 1000, DEFAULT_K_FACTOR);
        assert_eq!(update.winner, 1016);
        assert_eq!(update.loser, 984);
    }

    #[test]
    fn test_winner_never_drops_loser_never_gains() {
        let ratings = [-500, 0, 400, 984, 1000, 1016, 2400, 3000];
        for &w in &ratings {
            for &l in &ratings {
                let update = calculate_elo(w, l, DEFAULT_K_FACTOR);
                assert!(update.winner >= w, "winner {w} vs {l} dropped to {}", update.winner);
                assert!(update.loser <= l, "loser {l} vs {w} rose to {}", update.loser);
            }
        }
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let upset = calculate_elo(800, 1200, DEFAULT_K_FACTOR);
        let expected = calculate_elo(1200, 800, DEFAULT_K_FACTOR);
        assert!(upset.winner - 800 > expected.winner - 1200);
    }

    #[test]
    fn test_huge_gap_barely_moves_favorite() {
        // A 2400 rating beating an 800 rating gains nothing after rounding.
        let update = calculate_elo(2400, 800, DEFAULT_K_FACTOR);
        assert_eq!(update.winner, 2400);
        assert_eq!(update.loser, 800);
    }

    #[test]
    fn test_k_scales_the_step() {
        let small = calculate_elo(1000, 1000, 16.0);
        let large = calculate_elo(1000, 1000, 64.0);
        assert_eq!(small.winner, 1008);
        assert_eq!(large.winner, 1032);
    }
}
