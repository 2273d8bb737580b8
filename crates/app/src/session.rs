use log::{debug, info};
use maze_core::sim::clamp_stars;
use maze_core::{
    Campaign, KeyValueStore, LevelSimulation, LevelStatus, MazeError, SimConfig, SimEvent,
    generate_level,
};

use crate::format_fingerprint;
use crate::frame_input::FrameInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    MainMenu,
    Playing,
    Paused,
    LevelComplete {
        stars: u8,
        time_secs: u32,
    },
    GameOver,
}

/// Top-level controller: owns the campaign and, while a level is loaded, its simulation.
pub struct Session<S: KeyValueStore> {
    campaign: Campaign<S>,
    config: SimConfig,
    run_seed: u64,
    attempt: u32,
    mode: SessionMode,
    level: Option<LevelSimulation>,
    fingerprint: Option<u64>,
    /// Events raised during the most recent frame.
    events: Vec<SimEvent>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(campaign: Campaign<S>, run_seed: u64, config: SimConfig) -> Self {
        Self {
            campaign,
            config,
            run_seed,
            attempt: 0,
            mode: SessionMode::MainMenu,
            level: None,
            fingerprint: None,
            events: Vec::new(),
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn level(&self) -> Option<&LevelSimulation> {
        self.level.as_ref()
    }

    pub fn campaign(&self) -> &Campaign<S> {
        &self.campaign
    }

    pub fn campaign_mut(&mut self) -> &mut Campaign<S> {
        &mut self.campaign
    }

    /// Layout fingerprint of the loaded attempt.
    pub fn fingerprint(&self) -> Option<u64> {
        self.fingerprint
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Level select: moves the campaign cursor and loads a fresh attempt.
    pub fn start_level(&mut self, level_id: u32) -> Result<(), MazeError> {
        if !self.campaign.set_level(level_id) {
            return Err(MazeError::UnknownLevel(level_id));
        }
        self.attempt = 0;
        self.load_current_level()
    }

    /// Runs one frame. Ticks only happen while playing; other modes react to menu keys.
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> Result<(), MazeError> {
        self.events.clear();
        match self.mode {
            SessionMode::MainMenu => {}
            SessionMode::Playing => {
                if input.pause {
                    self.toggle_pause();
                    return Ok(());
                }
                self.advance_level(input, dt);
            }
            SessionMode::Paused => {
                if input.pause {
                    self.toggle_pause();
                } else if input.retry {
                    self.retry()?;
                } else if input.menu {
                    self.return_to_menu();
                }
            }
            SessionMode::LevelComplete { .. } => {
                if input.next_level {
                    self.advance_to_next_level()?;
                } else if input.retry {
                    self.retry()?;
                } else if input.menu {
                    self.return_to_menu();
                }
            }
            SessionMode::GameOver => {
                if input.retry {
                    self.retry()?;
                } else if input.menu {
                    self.return_to_menu();
                }
            }
        }
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            SessionMode::Playing => SessionMode::Paused,
            SessionMode::Paused => SessionMode::Playing,
            other => other,
        };
    }

    /// Reloads the current level with the next attempt's layout. No-op from the main menu.
    pub fn retry(&mut self) -> Result<(), MazeError> {
        if self.mode == SessionMode::MainMenu {
            return Ok(());
        }
        self.attempt += 1;
        self.load_current_level()
    }

    /// Returns `false` after the final level, which sends the player back to the menu.
    pub fn advance_to_next_level(&mut self) -> Result<bool, MazeError> {
        if !self.campaign.next_level() {
            self.return_to_menu();
            return Ok(false);
        }
        self.attempt = 0;
        self.load_current_level()?;
        Ok(true)
    }

    pub fn return_to_menu(&mut self) {
        self.level = None;
        self.fingerprint = None;
        self.mode = SessionMode::MainMenu;
    }

    fn load_current_level(&mut self) -> Result<(), MazeError> {
        let descriptor = self.campaign.current_level();
        let generated = generate_level(self.run_seed, descriptor, self.attempt)?;
        let fingerprint = generated.fingerprint();
        info!(
            "loading level {} '{}' (attempt {}, fingerprint {})",
            descriptor.id,
            descriptor.name,
            self.attempt,
            format_fingerprint(fingerprint)
        );

        let mut level = LevelSimulation::new(descriptor, generated, self.config);
        level.begin();
        self.level = Some(level);
        self.fingerprint = Some(fingerprint);
        self.mode = SessionMode::Playing;
        Ok(())
    }

    fn advance_level(&mut self, input: &FrameInput, dt: f32) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        level.tick(&input.tick_input(), dt);
        self.events = level.drain_events();
        for event in &self.events {
            debug!("level event: {event:?}");
        }

        match level.status() {
            LevelStatus::Completed => {
                let raw_stars = i64::from(level.raw_star_rating().unwrap_or(0));
                let time_secs = level.elapsed_whole_secs();
                self.campaign.complete_level(raw_stars);
                self.mode = SessionMode::LevelComplete { stars: clamp_stars(raw_stars), time_secs };
            }
            LevelStatus::Failed => self.mode = SessionMode::GameOver,
            LevelStatus::Loading | LevelStatus::Active => {}
        }
    }
}
