//! Headless demo driver.
//!
//! Plays each game with a simple bot on the virtual clock and logs every
//! transition. Useful for eyeballing engine behaviour and tuning config.
//!
//! Logging:
//! - LOG_LEVEL controls the filter (e.g. "debug" or "info,rhythm=debug").
//! - LOG_FORMAT selects "pretty" (default) or "json".

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use eduplay_games::core::{GameRng, GamesConfig, RandomSource};
use eduplay_games::games::arithmetic::{ArithmeticGame, ArithmeticStatus};
use eduplay_games::games::rhythm::{RhythmGame, RhythmPhase};
use eduplay_games::games::sequence::{SequenceGame, SequenceStatus};
use eduplay_games::games::words::{WordsGame, DEFAULT_WORDS};
use eduplay_games::{catalog, GameKind, MiniGame};

/// Play the EduPlay mini-games with a bot.
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Bot-play the EduPlay mini-games on a virtual clock", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed for every engine's random source. Drawn from OS entropy if omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play only this game (e.g. "rhythm-master" or "game-4")
    #[arg(short, long)]
    game: Option<String>,

    /// TOML config file. Falls back to EDUPLAY_CONFIG_PATH, then defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("info,eduplay=debug"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GamesConfig::load(path)?,
        None => GamesConfig::from_env(),
    };

    let kinds: Vec<GameKind> = match cli.game.as_deref() {
        Some(name) => {
            let kind = name
                .parse::<GameKind>()
                .ok()
                .or_else(|| GameKind::from_id(name))
                .ok_or_else(|| anyhow::anyhow!("unknown game: {name}"))?;
            vec![kind]
        }
        None => catalog().iter().map(|info| info.kind).collect(),
    };

    let root = cli.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    info!(target: "eduplay", seed = root.seed(), "Seeded");
    for kind in kinds {
        let info = kind.info();
        info!(target: "eduplay", id = info.id, title = info.title, skill = %info.skill, "Playing");
        let rng = root.for_context(info.id);
        match kind {
            GameKind::EquationExpedition => play_arithmetic(&config, rng)?,
            GameKind::WordWeavers => play_words(&config, rng)?,
            GameKind::PatternDetectives => play_sequence(&config, rng)?,
            GameKind::RhythmMaster => play_rhythm(&config, rng)?,
        }
    }
    Ok(())
}

/// Answer every problem, getting roughly one in five wrong, one answer
/// every two seconds until the countdown runs out.
#[instrument(skip_all)]
fn play_arithmetic(config: &GamesConfig, mut bot: GameRng) -> Result<()> {
    let mut game = ArithmeticGame::try_new(config.arithmetic.clone(), bot.fork())?;
    game.start();
    while game.status() == ArithmeticStatus::Active {
        if let Some(problem) = game.problem() {
            let slip = if bot.below(5) == 0 { 1 } else { 0 };
            let answer = (problem.answer + slip).to_string();
            let outcome = game.submit(&answer);
            info!(target: "eduplay", %answer, ?outcome, "Answered");
        }
        game.advance(Duration::from_secs(2));
    }
    info!(target: "eduplay", score = game.score(), "Equation Expedition finished");
    Ok(())
}

/// Submit every listed word the scramble can spell, then a few misses.
#[instrument(skip_all)]
fn play_words(config: &GamesConfig, mut bot: GameRng) -> Result<()> {
    let mut game = WordsGame::try_new(config.words.clone(), bot.fork())?;
    game.start();
    info!(target: "eduplay", letters = %game.letters(), "Scramble");

    let mut guesses: Vec<&str> = DEFAULT_WORDS
        .iter()
        .copied()
        .filter(|word| game.letters().can_form(word))
        .collect();
    guesses.extend(["AT", "QUIZ"]);
    bot.shuffle(&mut guesses);

    for guess in guesses {
        let verdict = game.submit(guess);
        info!(target: "eduplay", guess, ?verdict, "Submitted");
        game.advance(Duration::from_millis(800));
    }
    info!(target: "eduplay", score = game.score(), found = game.found_words().count(), "Word Weavers finished");
    Ok(())
}

/// Pick the right answer most of the time until the run completes.
#[instrument(skip_all)]
fn play_sequence(config: &GamesConfig, mut bot: GameRng) -> Result<()> {
    let mut game = SequenceGame::try_new(config.sequence.clone(), bot.fork())?;
    game.start();
    while let SequenceStatus::Active { level, .. } = game.status() {
        let Some(round) = game.round() else { break };
        let rule = round.pattern.rule;
        let index = if bot.below(4) == 0 {
            bot.below(round.choices.len())
        } else {
            round.answer_index()
        };
        let outcome = game.choose_index(index);
        info!(target: "eduplay", level, %rule, ?outcome, "Chose");
        game.run_pending(Duration::from_secs(5));
    }
    info!(target: "eduplay", status = ?game.status(), "Pattern Detectives finished");
    Ok(())
}

/// Repeat each playback perfectly until the bot's memory gives out.
#[instrument(skip_all)]
fn play_rhythm(config: &GamesConfig, mut bot: GameRng) -> Result<()> {
    let mut game = RhythmGame::try_new(config.rhythm.clone(), bot.fork())?;
    let span = 3 + bot.below(6) as u32;
    game.start();

    loop {
        game.run_pending(Duration::from_secs(60));
        for cue in game.drain_cues() {
            info!(target: "eduplay", ?cue, "Cue");
        }
        match game.phase() {
            RhythmPhase::AwaitingPlayer => {}
            RhythmPhase::Ended { completed_rounds } => {
                info!(target: "eduplay", completed_rounds, "Rhythm Master finished");
                return Ok(());
            }
            RhythmPhase::Idle => return Ok(()),
            RhythmPhase::PlayingBack | RhythmPhase::RoundCleared => continue,
        }

        let mut pads = game.sequence().to_vec();
        if game.round() > span {
            if let Some(last) = pads.last_mut() {
                last.0 = (last.0 + 1) % game.pads();
            }
        }
        for pad in pads {
            let outcome = game.handle_input(pad);
            info!(target: "eduplay", round = game.round(), %pad, ?outcome, "Pressed");
            game.advance(Duration::from_millis(300));
        }
    }
}
