use anyhow::{Context, Result, bail};
use clap::Parser;
use maze_core::mapgen::{
    GeneratedLevel, LevelGenerator, MazeRng, derive_level_seed, hazards, maze, spawns,
};
use maze_core::{CellKind, EnemyKind, Pos, find_level};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed the level seed is derived from
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Campaign level id to generate
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    /// Retry index folded into the level seed
    #[arg(short, long, default_value_t = 0)]
    attempt: u32,
    /// Generate a bare maze of this odd width instead of a campaign level
    #[arg(long, requires = "height")]
    width: Option<usize>,
    #[arg(long, requires = "width")]
    height: Option<usize>,
    /// Hazard difficulty for a bare maze
    #[arg(long, default_value_t = 1)]
    difficulty: u32,
    /// Patrol enemies for a bare maze
    #[arg(long, default_value_t = 0)]
    enemies: usize,
    /// Key and door pairs for a bare maze
    #[arg(long, default_value_t = 0)]
    keys: usize,
    /// Print statistics as JSON instead of the map
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct LevelStats {
    level_id: u32,
    seed: u64,
    width: usize,
    height: usize,
    fingerprint: String,
    walkable_cells: usize,
    path_length: Option<usize>,
    traps: usize,
    collapsible_floors: usize,
    enemies: usize,
    bosses: usize,
    keys: usize,
    doors: usize,
}

impl LevelStats {
    fn of(level: &GeneratedLevel) -> Self {
        let grid = &level.grid;
        Self {
            level_id: level.level_id,
            seed: level.seed,
            width: grid.width(),
            height: grid.height(),
            fingerprint: format!("0x{:016x}", level.fingerprint()),
            walkable_cells: grid.walkable_count(),
            path_length: grid.shortest_path(grid.start(), grid.exit()).map(|path| path.len()),
            traps: level.traps.len(),
            collapsible_floors: level.collapsible_floors.len(),
            enemies: level.enemies.len(),
            bosses: level.enemies.iter().filter(|enemy| enemy.kind == EnemyKind::Boss).count(),
            keys: level.keys.len(),
            doors: level.doors.len(),
        }
    }
}

/// Overlays render in priority order: doors, enemies, traps, keys, then the cell itself.
fn glyph_at(level: &GeneratedLevel, pos: Pos) -> char {
    if level.doors.iter().any(|door| door.pos == pos) {
        return 'D';
    }
    if let Some(enemy) = level.enemies.iter().find(|enemy| enemy.pos == pos) {
        return if enemy.kind == EnemyKind::Boss { 'B' } else { 'M' };
    }
    if level.traps.iter().any(|trap| trap.pos == pos) {
        return '^';
    }
    if level.keys.iter().any(|key| key.pos == pos) {
        return 'k';
    }
    match level.grid.cell_at(pos) {
        CellKind::Wall => '#',
        CellKind::Open => '.',
        CellKind::Start => 'S',
        CellKind::Exit => 'E',
        CellKind::CollapsibleFloor => '~',
    }
}

fn render(level: &GeneratedLevel) -> String {
    let mut out = String::new();
    for y in 0..level.grid.height() as i32 {
        for x in 0..level.grid.width() as i32 {
            out.push(glyph_at(level, Pos { y, x }));
        }
        out.push('\n');
    }
    out
}

/// A campaign-free level built step by step from the generation primitives.
fn bare_level(args: &Args, width: usize, height: usize) -> Result<GeneratedLevel> {
    let mut rng = MazeRng::seed_from_u64(args.seed);
    let mut grid = maze::generate_maze(width, height, &mut rng)?;
    let hazards = hazards::place_traps(&mut grid, args.difficulty, &mut rng);
    let enemies = spawns::spawn_enemies(&grid, args.enemies, EnemyKind::Patrol, &mut rng);
    let (keys, doors) = spawns::place_keys_and_doors(&grid, args.keys, &mut rng);
    Ok(GeneratedLevel {
        level_id: 0,
        seed: args.seed,
        grid,
        traps: hazards.traps,
        collapsible_floors: hazards.collapsible_floors,
        enemies,
        keys,
        doors,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match (args.width, args.height) {
        (Some(width), Some(height)) => bare_level(&args, width, height)
            .with_context(|| format!("failed to generate a {width}x{height} maze"))?,
        _ => {
            let Some(descriptor) = find_level(args.level) else {
                bail!("unknown level id {}", args.level);
            };
            let seed = derive_level_seed(args.seed, descriptor.id, args.attempt);
            LevelGenerator::new(seed)
                .generate(descriptor)
                .with_context(|| format!("failed to generate level {}", descriptor.id))?
        }
    };

    let stats = LevelStats::of(&level);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render(&level));
        println!(
            "level {} seed {} {}x{} fingerprint {}",
            stats.level_id, stats.seed, stats.width, stats.height, stats.fingerprint
        );
        println!(
            "walkable {} path {:?} traps {} floors {} enemies {} (bosses {}) keys {} doors {}",
            stats.walkable_cells,
            stats.path_length,
            stats.traps,
            stats.collapsible_floors,
            stats.enemies,
            stats.bosses,
            stats.keys,
            stats.doors
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_maze_renders_with_start_exit_and_border() {
        let args = Args::parse_from(["mazegen", "--width", "5", "--height", "5", "--seed", "3"]);
        let level = bare_level(&args, 5, 5).unwrap();
        let rendered = render(&level);
        let rows: Vec<&str> = rendered.lines().collect();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "#####");
        assert_eq!(rows[4], "#####");
        assert_eq!(rows[1].chars().nth(1), Some('S'));
        assert_eq!(rows[3].chars().nth(3), Some('E'));
    }

    #[test]
    fn stats_count_campaign_entities() {
        let descriptor = find_level(10).unwrap();
        let level = LevelGenerator::new(derive_level_seed(1, 10, 0)).generate(descriptor).unwrap();
        let stats = LevelStats::of(&level);

        assert_eq!(stats.bosses, 1);
        assert_eq!(stats.enemies, descriptor.enemies + 1);
        assert!(stats.path_length.is_some());
        assert!(stats.fingerprint.starts_with("0x"));
    }
}
