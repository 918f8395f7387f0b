use anyhow::Context as _;
use noughts_training::{
    opponent::LearningOpponent,
    self_play::{self, ScriptedPlayer, SelfPlayStats},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 200)]
    games: usize,
    /// Strategy of the scripted X player
    #[arg(long, default_value = "random")]
    opponent: ScriptedPlayer,
    /// Print a report after every this many games (0 for totals only)
    #[arg(long, default_value_t = 50)]
    report_every: usize,
}

pub(crate) fn run(
    engine: &mut LearningOpponent,
    arg: &SelfPlayArg,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let &SelfPlayArg {
        games,
        opponent,
        report_every,
    } = arg;
    // Scripted side gets its own stream so `--seed` replays whole sessions.
    let mut rng = match seed {
        Some(seed) => Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        None => Pcg32::from_rng(&mut rand::rng()),
    };

    eprintln!("Playing {games} games against {opponent} X...");
    let mut total = SelfPlayStats::default();
    let mut batch = SelfPlayStats::default();
    for n in 1..=games {
        let game = self_play::play_game(engine, opponent, &mut rng)
            .with_context(|| format!("Game #{n} ended with an illegal move"))?;
        total.record(game.outcome());
        batch.record(game.outcome());

        if n.is_multiple_of(report_every) {
            eprintln!("Games #{}-#{n}: {batch}", n + 1 - batch.games);
            eprintln!(
                "  Examples: {}, model: {}",
                engine.examples_seen(),
                if engine.classifier().is_some() {
                    "trained"
                } else {
                    "untrained"
                }
            );
            batch = SelfPlayStats::default();
        }
    }
    eprintln!("Total: {total}");
    Ok(())
}
