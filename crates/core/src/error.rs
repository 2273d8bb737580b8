use std::io;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions must be odd and at least 5x5, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("no level with id {0} in the campaign")]
    UnknownLevel(u32),

    #[error("a campaign needs at least one level")]
    EmptyCampaign,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("progress could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
