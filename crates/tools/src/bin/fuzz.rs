use anyhow::{Result, bail};
use clap::Parser;
use maze_core::{CAMPAIGN, LevelSimulation, SimConfig, TickInput, find_level, generate_level};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5000)]
    ticks: u32,
    /// Level to fuzz; every campaign level when omitted
    #[arg(short, long)]
    level: Option<u32>,
    /// Frames each random input is held for
    #[arg(long, default_value_t = 6)]
    hold: u32,
}

/// Frame lengths to draw from; the long ones stand in for a stalled frame.
const FRAME_SECS: [f32; 8] =
    [1.0 / 30.0, 1.0 / 30.0, 1.0 / 30.0, 1.0 / 30.0, 1.0 / 30.0, 1.0 / 60.0, 0.25, 0.5];

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn random_input(rng: &mut ChaCha8Rng) -> TickInput {
    TickInput {
        move_x: choose(rng, &[-1, 0, 1]),
        move_y: choose(rng, &[-1, 0, 1]),
        sprint: choose(rng, &[false, false, false, true]),
        interact: choose(rng, &[false, false, false, false, true]),
    }
}

fn fuzz_level(args: &Args, level_id: u32) -> Result<()> {
    let Some(descriptor) = find_level(level_id) else {
        bail!("unknown level id {level_id}");
    };
    let level = generate_level(args.seed, descriptor, 0)?;
    let mut sim = LevelSimulation::new(descriptor, level, SimConfig::default());
    sim.begin();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed ^ u64::from(level_id));

    let mut total_steps = 0;
    let mut input = TickInput::default();
    while total_steps < args.ticks {
        if total_steps % args.hold.max(1) == 0 {
            input = random_input(&mut rng);
        }
        let dt = choose(&mut rng, &FRAME_SECS);
        sim.tick(&input, dt);
        total_steps += 1;

        // Assert invariants
        if let Err(violation) = sim.check_invariants() {
            bail!("Invariant failed on level {level_id} at tick {total_steps}: {violation}");
        }
        if sim.status().is_terminal() {
            break;
        }
    }

    println!(
        "level {level_id}: {:?} after {total_steps} ticks, health {}, keys {}",
        sim.status(),
        sim.health(),
        sim.key_credit()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} steps...", args.seed, args.ticks);
    match args.level {
        Some(level_id) => fuzz_level(&args, level_id)?,
        None => {
            for descriptor in &CAMPAIGN {
                fuzz_level(&args, descriptor.id)?;
            }
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
