//! Scripted games against the learning engine.
//!
//! A [`ScriptedPlayer`] plays `X` and the [`LearningOpponent`] plays `O`. Every
//! board is handed to [`LearningOpponent::respond`] exactly as a delivery layer
//! would send it, including the final board after a winning `X` move, so the
//! engine learns from self-play the same way it learns from real games.

use std::fmt;

use noughts_engine::{Game, Mark, Move, MoveError, Outcome};
use noughts_evaluator::{heuristic, tactical};
use rand::{Rng, seq::IndexedRandom as _};

use crate::opponent::LearningOpponent;

/// Fixed strategies for the `X` side.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub enum ScriptedPlayer {
    /// Uniformly random empty cell
    #[default]
    Random,
    /// Center, then corners, then edges
    Heuristic,
    /// Wins or blocks when possible, otherwise plays like `Heuristic`
    Tactical,
}

impl ScriptedPlayer {
    /// Chooses an `X` move on the current board, `None` when it is full.
    pub fn choose<R>(self, game: &Game, rng: &mut R) -> Option<Move>
    where
        R: Rng + ?Sized,
    {
        let board = game.board();
        let empty_cells = board.empty_cells();
        match self {
            ScriptedPlayer::Random => empty_cells.choose(rng).copied(),
            ScriptedPlayer::Heuristic => heuristic::select_heuristic(&empty_cells, rng),
            ScriptedPlayer::Tactical => tactical::find_immediate_move(board, Mark::Player)
                .or_else(|| tactical::find_immediate_move(board, Mark::Opponent))
                .or_else(|| heuristic::select_heuristic(&empty_cells, rng)),
        }
    }
}

/// Plays one game, `X` first, and returns the finished game.
pub fn play_game<R>(
    engine: &mut LearningOpponent,
    player: ScriptedPlayer,
    rng: &mut R,
) -> Result<Game, MoveError>
where
    R: Rng + ?Sized,
{
    let mut game = Game::new();
    while let Some(mv) = player.choose(&game, rng) {
        game.play(mv)?;
        let response = engine.respond(*game.board());
        if game.is_over() {
            break;
        }
        let Some(reply) = response.mv else {
            break;
        };
        game.play(reply)?;
        if game.is_over() {
            break;
        }
    }
    Ok(game)
}

/// Win/loss/tie tally from the engine's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelfPlayStats {
    pub games: usize,
    pub engine_wins: usize,
    pub engine_losses: usize,
    pub ties: usize,
}

impl SelfPlayStats {
    pub fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome.winner() {
            Some(Mark::Opponent) => self.engine_wins += 1,
            Some(Mark::Player) => self.engine_losses += 1,
            None => self.ties += 1,
        }
    }

    /// Fraction of games the engine did not lose.
    #[must_use]
    pub fn non_loss_rate(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        #[expect(clippy::cast_precision_loss)]
        let (non_losses, games) = ((self.games - self.engine_losses) as f32, self.games as f32);
        non_losses / games
    }
}

impl fmt::Display for SelfPlayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: {} won, {} lost, {} tied (non-loss {:.1}%)",
            self.games,
            self.engine_wins,
            self.engine_losses,
            self.ties,
            self.non_loss_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::opponent::OpponentConfig;

    #[test]
    fn test_games_always_finish() {
        let mut rng = Pcg32::seed_from_u64(11);
        for player in [
            ScriptedPlayer::Random,
            ScriptedPlayer::Heuristic,
            ScriptedPlayer::Tactical,
        ] {
            let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 5);
            for _ in 0..20 {
                let game = play_game(&mut engine, player, &mut rng).unwrap();
                assert!(game.is_over(), "{player}: {}", game.board());
            }
        }
    }

    #[test]
    fn test_wins_and_engine_made_ties_are_recorded() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 6);
        let mut stats = SelfPlayStats::default();
        let mut engine_made_ties = 0;
        for _ in 0..30 {
            let game = play_game(&mut engine, ScriptedPlayer::Random, &mut rng).unwrap();
            stats.record(game.outcome());
            // `to_move` has already flipped, so `X` to move means `O` moved last.
            if game.outcome().is_tie() && game.to_move() == Mark::Player {
                engine_made_ties += 1;
            }
        }
        assert_eq!(stats.games, 30);
        assert_eq!(
            engine.examples_seen(),
            stats.engine_wins + stats.engine_losses + engine_made_ties
        );
    }

    #[test]
    fn test_engine_first_tie_is_recorded() {
        // With `O` opening, the ninth move of a drawn game is the engine's.
        let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 6);
        let mut game = Game::with_first_mover(Mark::Opponent);
        for index in [4, 0, 8, 2, 1, 7, 3, 5] {
            game.play(Move::new(index).unwrap()).unwrap();
        }
        let response = engine.respond(*game.board());
        assert_eq!(response.mv.map(Move::index), Some(6));
        game.play(response.mv.unwrap()).unwrap();
        assert!(game.outcome().is_tie());
        assert_eq!(engine.examples_seen(), 1);
    }

    #[test]
    fn test_tactical_player_does_not_win_every_game() {
        let mut rng = Pcg32::seed_from_u64(13);
        let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 7);
        let mut stats = SelfPlayStats::default();
        for _ in 0..20 {
            let game = play_game(&mut engine, ScriptedPlayer::Tactical, &mut rng).unwrap();
            stats.record(game.outcome());
        }
        assert!(stats.engine_losses < stats.games);
    }

    #[test]
    fn test_scripted_player_parses_lowercase() {
        assert_eq!(
            "tactical".parse::<ScriptedPlayer>().unwrap(),
            ScriptedPlayer::Tactical
        );
        assert_eq!(
            "Random".parse::<ScriptedPlayer>().unwrap(),
            ScriptedPlayer::Random
        );
        assert!("minimax".parse::<ScriptedPlayer>().is_err());
    }

    #[test]
    fn test_stats_display() {
        let stats = SelfPlayStats {
            games: 4,
            engine_wins: 1,
            engine_losses: 1,
            ties: 2,
        };
        assert_eq!(
            stats.to_string(),
            "4 games: 1 won, 1 lost, 2 tied (non-loss 75.0%)"
        );
    }
}
