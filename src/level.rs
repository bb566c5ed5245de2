use crate::board::{Board, Tile};
use crate::entities::Enemy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

pub(crate) const GRID_WIDTH: usize = 17;
pub(crate) const GRID_HEIGHT: usize = 13;

const CRATE_DENSITY: f64 = 0.6;
const POWERUP_CHANCE: f64 = 0.3;

const ENEMIES_PER_LEVEL: [usize; 3] = [3, 4, 5];
const DEFAULT_ENEMY_COUNT: usize = 3;
pub(crate) const LEVEL_COUNT: usize = ENEMIES_PER_LEVEL.len();

// Rejection sampling for enemy spawns is bounded so generation always
// terminates, even on a board with no open cell in the spawn region.
const PLACEMENT_ATTEMPTS: usize = 1_000;

/// Builds the maze board and initial enemy placement for a level.
///
/// The exit hides under one crate chosen uniformly at random. A level that
/// rolled zero crates gets no exit and cannot be finished; that degenerate
/// board is still returned as-is.
pub(crate) fn generate(level: usize, rng: &mut StdRng) -> (Board, Vec<Enemy>) {
    let mut board = Board::new(GRID_WIDTH, GRID_HEIGHT);

    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            if x == 0
                || x == GRID_WIDTH - 1
                || y == 0
                || y == GRID_HEIGHT - 1
                || (x % 2 == 0 && y % 2 == 0)
            {
                board.set(x, y, Tile::Wall);
            }
        }
    }

    let mut crates = Vec::new();
    for y in 1..GRID_HEIGHT - 1 {
        for x in 1..GRID_WIDTH - 1 {
            if board.get(x, y) == Some(Tile::Floor)
                && !in_spawn_zone(x, y)
                && rng.gen_bool(CRATE_DENSITY)
            {
                board.set(x, y, Tile::Crate);
                crates.push((x, y));
            }
        }
    }

    if !crates.is_empty() {
        let index = rng.gen_range(0..crates.len());
        let (x, y) = crates.swap_remove(index);
        board.conceal(x, y, Tile::Exit);
    }

    for (x, y) in crates {
        if rng.gen_bool(POWERUP_CHANCE) {
            let powerup = match rng.gen_range(0..3) {
                0 => Tile::PowerUpBomb,
                1 => Tile::PowerUpRange,
                _ => Tile::PowerUpSpeed,
            };
            board.conceal(x, y, powerup);
        }
    }

    let enemies = place_enemies(&board, enemy_count(level), rng);

    (board, enemies)
}

pub(crate) fn enemy_count(level: usize) -> usize {
    ENEMIES_PER_LEVEL
        .get(level.saturating_sub(1))
        .copied()
        .unwrap_or(DEFAULT_ENEMY_COUNT)
}

/// The L-shaped region around the spawn cell that generation keeps free of
/// crates so the player is never boxed in on the first tick.
fn in_spawn_zone(x: usize, y: usize) -> bool {
    (x <= 2 && y == 1) || (x == 1 && y <= 2)
}

fn place_enemies(board: &Board, count: usize, rng: &mut StdRng) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(count);
    for _ in 0..count {
        let (x, y) = sample_spawn_cell(board, rng);
        enemies.push(Enemy::new(x as f64, y as f64, rng.gen()));
    }
    enemies
}

fn sample_spawn_cell(board: &Board, rng: &mut StdRng) -> (usize, usize) {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = rng.gen_range(1..GRID_WIDTH - 1);
        let y = rng.gen_range(1..GRID_HEIGHT - 1);
        if board.get(x, y) == Some(Tile::Floor) && x > 5 && y > 5 {
            return (x, y);
        }
    }

    // No luck away from the spawn; any floor cell keeps the game playable.
    board
        .floor_cells()
        .choose(rng)
        .copied()
        .unwrap_or((1, 1))
}
