use std::io::{self, BufRead, Write as _};

use anyhow::Context as _;
use noughts_engine::{Game, Mark, Move, Outcome};
use noughts_training::{
    opponent::{LearningOpponent, TurnStatus},
    self_play::SelfPlayStats,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Stop after this many games instead of asking to play again
    #[arg(long)]
    games: Option<usize>,
}

pub(crate) fn run(engine: &mut LearningOpponent, arg: &PlayArg) -> anyhow::Result<()> {
    let mut lines = io::stdin().lock().lines();
    let mut stats = SelfPlayStats::default();

    println!("You are X. Cells are numbered 0-8, row by row. Enter q to quit.");
    loop {
        let Some(outcome) = play_one(engine, &mut lines)? else {
            break;
        };
        stats.record(outcome);
        println!("Engine record: {stats}");

        match arg.games {
            Some(games) if stats.games >= games => break,
            Some(_) => {}
            None => {
                let answer = prompt(&mut lines, "Play again? [Y/n] ")?;
                if matches!(answer.as_deref().map(str::trim), Some("n" | "N") | None) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Plays one game; `None` if the user quits before it is over.
fn play_one<I>(engine: &mut LearningOpponent, lines: &mut I) -> anyhow::Result<Option<Outcome>>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut game = Game::new();
    loop {
        println!("\n{}\n", game.board());
        let Some(answer) = prompt(lines, "Your move: ")? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        let Ok(index) = answer.parse::<usize>() else {
            println!("Enter a cell number from 0 to 8.");
            continue;
        };
        if let Err(e) = Move::try_from(index).and_then(|mv| game.play(mv)) {
            println!("{e}");
            continue;
        }

        let response = engine.respond(*game.board());
        if let Some(mv) = response.mv {
            game.play(mv).context("Engine answered with an illegal move")?;
            println!("O plays {mv}");
        }
        if response.status == TurnStatus::GameOver {
            println!("\n{}\n", game.board());
            let outcome = game.outcome();
            match outcome.winner() {
                Some(Mark::Player) => println!("You win!"),
                Some(Mark::Opponent) => println!("O wins."),
                None => println!("It's a tie."),
            }
            return Ok(Some(outcome));
        }
    }
}

fn prompt<I>(lines: &mut I, message: &str) -> anyhow::Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{message}");
    io::stdout().flush().context("Failed to flush stdout")?;
    lines
        .next()
        .transpose()
        .context("Failed to read from stdin")
}

#[cfg(test)]
mod tests {
    use noughts_training::opponent::OpponentConfig;

    use super::*;

    fn input(lines: &[&str]) -> impl Iterator<Item = io::Result<String>> {
        lines
            .iter()
            .map(|l| Ok((*l).to_owned()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_quit_ends_game_without_outcome() {
        let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 1);
        let mut lines = input(&["0", "q"]);
        assert_eq!(play_one(&mut engine, &mut lines).unwrap(), None);
    }

    #[test]
    fn test_bad_input_is_asked_again() {
        let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 1);
        // Engine takes the center after 0, so "4" is rejected as occupied.
        let mut lines = input(&["x", "9", "0", "4"]);
        assert_eq!(play_one(&mut engine, &mut lines).unwrap(), None);
    }

    #[test]
    fn test_drawn_game_is_not_learned() {
        let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 1);
        // O answers 4, then blocks at 2 and 3, then takes corner 8.
        let mut lines = input(&["0", "1", "6", "5", "7"]);
        let outcome = play_one(&mut engine, &mut lines).unwrap();
        assert_eq!(outcome, Some(Outcome::Tie));
        assert_eq!(engine.examples_seen(), 0);
    }

    #[test]
    fn test_won_game_is_learned() {
        let mut engine = LearningOpponent::with_seed(OpponentConfig::default(), None, 1);
        // O answers 4, blocks at 2, then X ignores the 2-4-6 threat.
        let mut lines = input(&["0", "1", "3"]);
        let outcome = play_one(&mut engine, &mut lines).unwrap().unwrap();
        assert_eq!(outcome.winner(), Some(Mark::Opponent));
        assert_eq!(engine.examples_seen(), 1);
    }
}
