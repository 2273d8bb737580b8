pub mod frame_input;
pub mod progress_file;
pub mod seed;
pub mod session;

use maze_core::LevelStatus;
use serde::Serialize;

/// Format a level fingerprint as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_fingerprint(fingerprint: u64) -> String {
    format!("0x{fingerprint:016x}")
}

/// Map a finished level status to its reason code string.
pub fn outcome_code(status: LevelStatus) -> &'static str {
    match status {
        LevelStatus::Completed => "WIN_EXIT",
        LevelStatus::Failed => "DMG_HP_ZERO",
        LevelStatus::Loading | LevelStatus::Active => "UNFINISHED",
    }
}

/// One line of the headless runner's report.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    pub level_id: u32,
    pub name: String,
    pub attempt: u32,
    pub fingerprint: String,
    pub outcome: &'static str,
    pub time_secs: u32,
    pub health: u32,
    pub stars: u8,
}
