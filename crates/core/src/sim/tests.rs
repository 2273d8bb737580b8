use super::test_support::*;
use super::*;
use crate::content::CAMPAIGN;
use crate::mapgen::generate_level;
use crate::types::{CellKind, TrapKind};

fn tick_for(sim: &mut LevelSimulation, input: TickInput, dt: f32) {
    sim.tick(&input, dt);
}

#[test]
fn loading_level_ignores_ticks() {
    let mut sim =
        LevelSimulation::new(&corridor_descriptor(None), corridor_level(), corridor_config());
    let start = sim.player().pos;

    tick_for(&mut sim, TickInput { move_x: 1, ..idle() }, 0.5);

    assert_eq!(sim.status(), LevelStatus::Loading);
    assert_eq!(sim.player().pos, start);
    assert_eq!(sim.elapsed_secs(), 0.0);
}

#[test]
fn player_spawns_at_start_cell_center_with_full_health() {
    let sim = active_sim(corridor_level());
    assert_eq!(sim.tile_size(), 100.0);
    assert_eq!(sim.player().pos, Vec2::new(150.0, 150.0));
    assert_eq!(sim.health(), 5);
    assert_eq!(sim.key_credit(), 0);
}

#[test]
fn walls_block_movement_and_open_cells_do_not() {
    let mut sim = active_sim(corridor_level());

    tick_for(&mut sim, TickInput { move_y: -1, ..idle() }, 1.0);
    assert_eq!(sim.player().pos, Vec2::new(150.0, 150.0));

    tick_for(&mut sim, TickInput { move_x: 1, ..idle() }, 0.5);
    assert_eq!(sim.player().pos, Vec2::new(300.0, 150.0));
    assert_eq!(sim.cell_of(sim.player().pos), Pos { y: 1, x: 3 });
}

#[test]
fn sprint_scales_player_speed() {
    let mut sim = active_sim(corridor_level());
    tick_for(&mut sim, TickInput { move_x: 1, sprint: true, ..idle() }, 0.5);
    assert_eq!(sim.player().pos, Vec2::new(375.0, 150.0));
}

#[test]
fn collapsible_floor_damages_once_and_stays_collapsed() {
    let mut level = corridor_level();
    let floor_pos = Pos { y: 1, x: 3 };
    level.grid.set_cell(floor_pos, CellKind::CollapsibleFloor);
    level.collapsible_floors.push(CollapsibleFloor { pos: floor_pos, active: true });
    let mut sim = active_sim(level);

    sim.place_player(sim.cell_center(floor_pos));
    tick_for(&mut sim, idle(), 0.01);

    assert_eq!(sim.health(), 4);
    assert!(!sim.collapsible_floors()[0].active);
    let events = sim.drain_events();
    assert!(events.contains(&SimEvent::FloorCollapsed { pos: floor_pos }));
    assert!(events.contains(&SimEvent::Damaged {
        source: DamageSource::CollapsibleFloor,
        health: 4,
    }));

    tick_for(&mut sim, idle(), 2.0);
    tick_for(&mut sim, idle(), 0.1);
    assert_eq!(sim.health(), 4);
    assert!(sim.drain_events().is_empty());
}

#[test]
fn invulnerability_allows_one_hit_until_it_expires() {
    let mut level = corridor_level();
    for x in [2, 3] {
        level.traps.push(Trap { pos: Pos { y: 1, x }, kind: TrapKind::Spike });
    }
    let mut sim = active_sim(level);

    sim.place_player(Vec2::new(300.0, 150.0));
    tick_for(&mut sim, idle(), 0.01);
    assert_eq!(sim.health(), 4);
    assert!(sim.player().is_invulnerable(sim.elapsed_secs()));

    tick_for(&mut sim, idle(), 0.5);
    assert_eq!(sim.health(), 4);

    tick_for(&mut sim, idle(), 1.1);
    assert_eq!(sim.health(), 3);
}

#[test]
fn enemy_and_trap_overlap_in_one_tick_deal_one_damage() {
    let mut level = corridor_level();
    level.traps.push(Trap { pos: Pos { y: 1, x: 3 }, kind: TrapKind::Spike });
    level.enemies.push(patrol_at(Pos { y: 1, x: 3 }));
    let mut sim = active_sim(level);

    sim.place_enemy(0, Vec2::new(350.0, 150.0), Vec2::ZERO);
    sim.place_player(Vec2::new(350.0, 150.0));
    tick_for(&mut sim, idle(), 0.01);

    assert_eq!(sim.health(), 4);
}

#[test]
fn enemy_contact_knocks_player_away() {
    let mut level = corridor_level();
    level.enemies.push(patrol_at(Pos { y: 1, x: 5 }));
    let mut sim = active_sim(level);

    sim.place_enemy(0, Vec2::new(330.0, 150.0), Vec2::ZERO);
    sim.place_player(Vec2::new(300.0, 150.0));
    tick_for(&mut sim, idle(), 0.01);

    assert_eq!(sim.health(), 4);
    assert_eq!(sim.player().pos, Vec2::new(260.0, 150.0));
}

#[test]
fn knockback_never_pushes_player_into_a_wall() {
    let mut level = corridor_level();
    level.enemies.push(patrol_at(Pos { y: 1, x: 5 }));
    let mut sim = active_sim(level);

    sim.place_enemy(0, Vec2::new(150.0, 150.0), Vec2::ZERO);
    sim.place_player(Vec2::new(120.0, 150.0));
    tick_for(&mut sim, idle(), 0.01);

    assert_eq!(sim.health(), 4);
    assert_eq!(sim.player().pos, Vec2::new(120.0, 150.0));
    assert!(sim.can_move_to(sim.player().pos));
}

/// Start at (1,1), a locked door on the wall at (1,2), open corridor beyond.
fn corridor_with_locked_door() -> GeneratedLevel {
    let mut level = corridor_level();
    let door_pos = Pos { y: 1, x: 2 };
    level.grid.set_cell(door_pos, CellKind::Wall);
    level.doors.push(Door { id: 0, pos: door_pos, locked: true });
    level
}

#[test]
fn knockback_longer_than_a_tile_cannot_cross_a_locked_door() {
    let mut level = corridor_with_locked_door();
    level.enemies.push(patrol_at(Pos { y: 1, x: 5 }));
    let config = SimConfig { world_extent: 348.0, ..corridor_config() };
    let mut sim = active_sim_with(level, config);
    let tile = sim.tile_size();
    assert!(tile < config.knockback_distance);

    let player = Vec2::new(2.0 * tile - 1.0, 1.5 * tile);
    sim.place_player(player);
    sim.place_enemy(0, Vec2::new(player.x - 5.0, player.y), Vec2::ZERO);
    tick_for(&mut sim, idle(), 0.001);

    assert_eq!(sim.health(), 4);
    assert_eq!(sim.cell_of(sim.player().pos), Pos { y: 1, x: 1 });
    assert_eq!(sim.player().pos, player);
    assert!(sim.doors()[0].locked);
    assert_eq!(sim.check_invariants(), Ok(()));
}

#[test]
fn long_frame_cannot_tunnel_through_a_locked_door() {
    let config = SimConfig { world_extent: 720.0, ..corridor_config() };
    let mut sim = active_sim_with(corridor_with_locked_door(), config);
    assert_eq!(sim.tile_size(), 80.0);
    let start = sim.player().pos;

    tick_for(&mut sim, TickInput { move_x: 1, ..idle() }, 0.5);

    assert_eq!(sim.player().pos, start);
    assert!(sim.doors()[0].locked);
    assert_eq!(sim.check_invariants(), Ok(()));
}

#[test]
fn long_frame_in_open_corridor_moves_in_half_tile_steps() {
    let mut sim = active_sim(corridor_level());

    tick_for(&mut sim, TickInput { move_x: 1, ..idle() }, 1.0);

    assert_eq!(sim.player().pos, Vec2::new(450.0, 150.0));
    assert_eq!(sim.player_trail.len(), 7);
    assert_eq!(sim.check_invariants(), Ok(()));
}

#[test]
fn invariants_flag_a_step_that_skips_a_tile() {
    let mut sim = active_sim(corridor_with_locked_door());
    tick_for(&mut sim, idle(), 0.01);
    assert_eq!(sim.check_invariants(), Ok(()));

    sim.player_trail = vec![Vec2::new(150.0, 150.0), Vec2::new(350.0, 150.0)];
    sim.place_player(Vec2::new(350.0, 150.0));
    let err = sim.check_invariants().unwrap_err();
    assert!(err.contains("jumped"), "{err}");
}

#[test]
fn key_credit_opens_one_door_per_key() {
    let mut level = corridor_level();
    level.keys.push(Key { id: 0, pos: Pos { y: 1, x: 3 }, collected: false });
    level.doors.push(Door { id: 0, pos: Pos { y: 2, x: 3 }, locked: true });
    let mut sim = active_sim(level);
    let door_center = sim.cell_center(Pos { y: 2, x: 3 });
    assert!(!sim.can_move_to(door_center));

    sim.place_player(Vec2::new(350.0, 180.0));
    let interact = TickInput { interact: true, ..idle() };

    // Interaction runs before pickups, so the first tick has no credit to spend.
    tick_for(&mut sim, interact, 0.01);
    assert!(sim.doors()[0].locked);
    assert!(sim.keys()[0].collected);
    assert_eq!(sim.key_credit(), 1);

    tick_for(&mut sim, interact, 0.01);
    assert!(!sim.doors()[0].locked);
    assert_eq!(sim.key_credit(), 0);
    assert!(sim.can_move_to(door_center));

    let events = sim.drain_events();
    assert_eq!(
        events,
        vec![
            SimEvent::KeyCollected { id: 0, key_credit: 1 },
            SimEvent::DoorUnlocked { id: 0, key_credit: 0 },
        ]
    );
}

#[test]
fn second_locked_door_stays_locked_without_credit() {
    let mut level = corridor_level();
    level.keys.push(Key { id: 0, pos: Pos { y: 1, x: 3 }, collected: false });
    level.doors.push(Door { id: 0, pos: Pos { y: 2, x: 3 }, locked: true });
    level.doors.push(Door { id: 1, pos: Pos { y: 0, x: 3 }, locked: true });
    let config = SimConfig { interaction_slack: 40.0, ..corridor_config() };
    let mut sim = active_sim_with(level, config);
    sim.place_player(Vec2::new(350.0, 150.0));
    let interact = TickInput { interact: true, ..idle() };

    tick_for(&mut sim, interact, 0.01);
    tick_for(&mut sim, interact, 0.01);
    assert!(!sim.doors()[0].locked);
    assert!(sim.doors()[1].locked);
    assert_eq!(sim.key_credit(), 0);
    sim.drain_events();

    tick_for(&mut sim, interact, 0.01);
    assert!(sim.doors()[1].locked);
    assert_eq!(sim.key_credit(), 0);
    assert!(
        !sim.drain_events().iter().any(|event| matches!(event, SimEvent::DoorUnlocked { .. }))
    );
    assert_eq!(sim.check_invariants(), Ok(()));
}

#[test]
fn collected_key_is_not_counted_twice() {
    let mut level = corridor_level();
    level.keys.push(Key { id: 4, pos: Pos { y: 1, x: 2 }, collected: false });
    let mut sim = active_sim(level);

    sim.place_player(Vec2::new(250.0, 150.0));
    for _ in 0..5 {
        tick_for(&mut sim, idle(), 0.1);
    }
    assert_eq!(sim.key_credit(), 1);
}

#[test]
fn reaching_exit_completes_with_unclamped_rating() {
    let mut sim = active_sim(corridor_level());

    sim.place_player(Vec2::new(750.0, 320.0));
    tick_for(&mut sim, idle(), 0.01);

    assert_eq!(sim.status(), LevelStatus::Completed);
    assert_eq!(sim.raw_star_rating(), Some(4));
    assert_eq!(clamp_stars(4), MAX_STARS);
    assert!(sim.drain_events().contains(&SimEvent::Completed { raw_stars: 4 }));
}

#[test]
fn completed_level_ignores_further_ticks() {
    let mut sim = active_sim(corridor_level());
    sim.place_player(Vec2::new(750.0, 320.0));
    tick_for(&mut sim, idle(), 0.01);
    let elapsed = sim.elapsed_secs();

    tick_for(&mut sim, TickInput { move_x: -1, ..idle() }, 1.0);

    assert_eq!(sim.status(), LevelStatus::Completed);
    assert_eq!(sim.elapsed_secs(), elapsed);
}

#[test]
fn losing_last_health_fails_and_freezes_the_level() {
    let mut level = corridor_level();
    level.traps.push(Trap { pos: Pos { y: 1, x: 2 }, kind: TrapKind::Spike });
    let config = SimConfig { max_health: 1, ..corridor_config() };
    let mut sim = active_sim_with(level, config);

    sim.place_player(Vec2::new(250.0, 150.0));
    tick_for(&mut sim, idle(), 0.01);

    assert_eq!(sim.status(), LevelStatus::Failed);
    assert_eq!(sim.health(), 0);
    assert_eq!(sim.raw_star_rating(), None);
    assert_eq!(
        sim.drain_events(),
        vec![SimEvent::Damaged { source: DamageSource::Trap, health: 0 }, SimEvent::Failed]
    );

    let frozen = sim.player().pos;
    tick_for(&mut sim, TickInput { move_x: 1, ..idle() }, 1.0);
    assert_eq!(sim.player().pos, frozen);
    assert!(sim.drain_events().is_empty());
}

#[test]
fn slow_hurt_clear_earns_base_star_only() {
    let mut sim = active_sim(corridor_level());
    sim.player.health = 3;

    tick_for(&mut sim, idle(), 60.0);
    sim.place_player(Vec2::new(750.0, 320.0));
    tick_for(&mut sim, idle(), 0.01);

    assert_eq!(sim.elapsed_whole_secs(), 60);
    assert_eq!(sim.raw_star_rating(), Some(1));
}

#[test]
fn enemies_stay_on_passable_cells_in_a_generated_level() {
    let descriptor = &CAMPAIGN[9];
    let level = generate_level(99, descriptor, 0).unwrap();
    let mut sim = LevelSimulation::new(descriptor, level, SimConfig::default());
    sim.begin();
    assert_eq!(sim.enemies().len(), descriptor.enemies + 1);

    for step in 0..900 {
        let input = TickInput { move_x: if step % 120 < 60 { 1 } else { -1 }, ..idle() };
        sim.tick(&input, 1.0 / 30.0);
        for enemy in sim.enemies() {
            assert!(sim.can_move_to(enemy.pos), "enemy left the maze at {:?}", enemy.pos);
        }
        assert!(sim.can_move_to(sim.player().pos));
    }
}
