use maze_app::frame_input::FrameInput;
use maze_app::progress_file::FileStore;
use maze_app::session::{Session, SessionMode};
use maze_core::{Autopilot, Campaign, KeyValueStore, PROGRESS_KEY, SimConfig};

fn play_until_settled(session: &mut Session<FileStore>) {
    let mut pilot = Autopilot::new();
    for _ in 0..20_000 {
        if session.mode() != SessionMode::Playing {
            return;
        }
        let level = session.level().expect("playing session has a level");
        let input = FrameInput::from(pilot.steer(level));
        session.frame(&input, 1.0 / 30.0).expect("frame should not fail");
    }
}

#[test]
fn cleared_tutorial_is_saved_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let campaign = Campaign::load(FileStore::new(dir.path()));
    let mut session = Session::new(campaign, 2026, SimConfig::default());

    session.start_level(1).unwrap();
    play_until_settled(&mut session);

    let SessionMode::LevelComplete { stars, time_secs } = session.mode() else {
        panic!("expected the tutorial to be cleared, got {:?}", session.mode());
    };
    assert!((1..=3).contains(&stars));
    assert_eq!(time_secs, session.level().unwrap().elapsed_whole_secs());

    let saved = FileStore::new(dir.path()).get(PROGRESS_KEY).unwrap().expect("progress saved");
    assert!(saved.contains("\"completed\":[1]"), "unexpected blob {saved}");

    let reloaded = Campaign::load(FileStore::new(dir.path()));
    assert!(reloaded.is_completed(1));
    assert_eq!(reloaded.stars(1), stars);
}

#[test]
fn level_complete_screen_reacts_to_menu_keys() {
    let dir = tempfile::tempdir().unwrap();
    let campaign = Campaign::load(FileStore::new(dir.path()));
    let mut session = Session::new(campaign, 5, SimConfig::default());

    session.start_level(1).unwrap();
    play_until_settled(&mut session);
    assert!(matches!(session.mode(), SessionMode::LevelComplete { .. }));

    let idle = FrameInput::default();
    session.frame(&idle, 1.0 / 30.0).unwrap();
    assert!(matches!(session.mode(), SessionMode::LevelComplete { .. }));

    session.frame(&FrameInput { next_level: true, ..idle }, 1.0 / 30.0).unwrap();
    assert_eq!(session.mode(), SessionMode::Playing);
    assert_eq!(session.campaign().current_level().id, 2);
    assert_eq!(session.attempt(), 0);

    session.frame(&FrameInput { pause: true, ..idle }, 1.0 / 30.0).unwrap();
    session.frame(&FrameInput { menu: true, ..idle }, 1.0 / 30.0).unwrap();
    assert_eq!(session.mode(), SessionMode::MainMenu);
    assert!(session.level().is_none());
    assert!(session.fingerprint().is_none());
}

#[test]
fn reset_progress_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let mut campaign = Campaign::load(FileStore::new(dir.path()));
    campaign.complete_level(3);
    campaign.reset_progress();

    let reloaded = Campaign::load(FileStore::new(dir.path()));
    assert!(!reloaded.is_completed(1));
    assert_eq!(reloaded.stars(1), 0);
}
