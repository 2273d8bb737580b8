use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::{Builder, Env};
use log::{info, warn};
use maze_app::frame_input::FrameInput;
use maze_app::progress_file::FileStore;
use maze_app::seed::SeedChoice;
use maze_app::session::{Session, SessionMode};
use maze_app::{LevelReport, format_fingerprint, outcome_code};
use maze_core::{Autopilot, CAMPAIGN, Campaign, SimConfig};

/// Headless runner: plays campaign levels with the autopilot and records progress.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed; a fresh one is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// First level id to play
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    /// Keep advancing through the campaign after each clear
    #[arg(long)]
    campaign: bool,
    /// Retries allowed per level after a game over
    #[arg(long, default_value_t = 2)]
    retries: u32,
    /// Simulation frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Where progress is stored; defaults to the platform data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Wipe saved progress before playing
    #[arg(long)]
    reset_progress: bool,
    /// Print one JSON report per level instead of plain text
    #[arg(long)]
    json: bool,
}

const MAX_FRAMES_PER_ATTEMPT: u32 = 60_000;

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.fps == 0 {
        bail!("--fps must be at least 1");
    }

    let seed = SeedChoice::resolve(args.seed);
    match seed {
        SeedChoice::Cli(value) => info!("using run seed {value}"),
        SeedChoice::Generated(value) => {
            info!("generated run seed {value} (pass --seed to replay)");
        }
    }

    let data_dir = match args.data_dir.clone() {
        Some(dir) => dir,
        None => FileStore::get_default_dir().context("no platform data directory available")?,
    };
    let mut campaign = Campaign::load(FileStore::new(&data_dir));
    if args.reset_progress {
        campaign.reset_progress();
        info!("progress reset in {}", data_dir.display());
    }

    let mut session = Session::new(campaign, seed.value(), SimConfig::default());
    session
        .start_level(args.level)
        .with_context(|| format!("cannot start level {}", args.level))?;

    let dt = 1.0 / args.fps as f32;
    let mut pilot = Autopilot::new();
    let mut frames = 0;
    let mut retries_left = args.retries;

    loop {
        match session.mode() {
            SessionMode::Playing => {
                let Some(level) = session.level() else {
                    bail!("session is playing without a level");
                };
                let input = FrameInput::from(pilot.steer(level));
                session.frame(&input, dt)?;
                frames += 1;
                if frames >= MAX_FRAMES_PER_ATTEMPT {
                    warn!("attempt exceeded {MAX_FRAMES_PER_ATTEMPT} frames, giving up");
                    break;
                }
            }
            SessionMode::LevelComplete { stars, .. } => {
                report(&session, stars, args.json)?;
                if !args.campaign {
                    break;
                }
                pilot = Autopilot::new();
                frames = 0;
                retries_left = args.retries;
                if !session.advance_to_next_level()? {
                    info!("campaign finished");
                    break;
                }
            }
            SessionMode::GameOver => {
                report(&session, 0, args.json)?;
                if retries_left == 0 {
                    break;
                }
                retries_left -= 1;
                pilot = Autopilot::new();
                frames = 0;
                session.retry()?;
            }
            SessionMode::Paused => session.toggle_pause(),
            SessionMode::MainMenu => break,
        }
    }

    let campaign = session.campaign();
    let completed = CAMPAIGN.iter().filter(|level| campaign.is_completed(level.id)).count();
    let stars: u32 = CAMPAIGN.iter().map(|level| u32::from(campaign.stars(level.id))).sum();
    println!("Progress: {completed}/{} levels, {stars} stars", CAMPAIGN.len());
    Ok(())
}

fn report(session: &Session<FileStore>, stars: u8, json: bool) -> Result<()> {
    let level = session.level().context("no level to report on")?;
    let descriptor = level.descriptor();
    let report = LevelReport {
        level_id: descriptor.id,
        name: descriptor.name.to_string(),
        attempt: session.attempt(),
        fingerprint: format_fingerprint(session.fingerprint().unwrap_or_default()),
        outcome: outcome_code(level.status()),
        time_secs: level.elapsed_whole_secs(),
        health: level.health(),
        stars,
    };

    if json {
        println!("{}", serde_json::to_string(&report).context("failed to encode level report")?);
    } else {
        println!(
            "Level {} '{}' attempt {}: {} in {}s, health {}, {} stars ({})",
            report.level_id,
            report.name,
            report.attempt,
            report.outcome,
            report.time_secs,
            report.health,
            report.stars,
            report.fingerprint
        );
    }
    Ok(())
}
