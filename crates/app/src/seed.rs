use maze_core::mapgen::seed::mix_seed_stream;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the run seed came from, so the runner can tell the player how to reproduce a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn resolve(cli_seed: Option<u64>) -> Self {
        match cli_seed {
            Some(seed) => Self::Cli(seed),
            None => Self::Generated(generate_runtime_seed()),
        }
    }

    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    let entropy = (now_nanos as u64) ^ ((now_nanos >> 64) as u64) ^ counter.rotate_left(7);

    mix_seed_stream(entropy, u64::from(process::id()))
}
