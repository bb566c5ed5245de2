use crossterm::style::Color;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use uuid::Uuid;

pub(crate) const PLAYER_START: (f64, f64) = (1.0, 1.0);
pub(crate) const ENEMY_SPEED: f64 = 0.07;

const PLAYER_START_BOMBS: usize = 1;
const PLAYER_START_RANGE: usize = 1;
const PLAYER_START_SPEED: f64 = 0.12;

/// Represents the direction an enemy can face.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The unit grid offset for this direction, with y growing downwards.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.gen_range(0..4) {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }
}

/// The player avatar. Position is continuous; grid interactions always go
/// through nearest-integer rounding.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    /// Total bomb capacity.
    pub bombs_max: usize,
    /// Capacity minus the bombs currently live on the board.
    pub bombs_left: usize,
    pub range: usize,
    pub speed: f64,
    pub alive: bool,
}

impl Player {
    pub fn new() -> Player {
        Player {
            x: PLAYER_START.0,
            y: PLAYER_START.1,
            bombs_max: PLAYER_START_BOMBS,
            bombs_left: PLAYER_START_BOMBS,
            range: PLAYER_START_RANGE,
            speed: PLAYER_START_SPEED,
            alive: true,
        }
    }

    /// Returns the player to the spawn cell with a full bomb stock, keeping
    /// accumulated capacity, range and speed upgrades.
    pub(crate) fn respawn(&mut self) {
        self.x = PLAYER_START.0;
        self.y = PLAYER_START.1;
        self.bombs_left = self.bombs_max;
    }

    pub(crate) fn glyph(&self) -> char {
        '@'
    }

    pub(crate) fn color(&self) -> Color {
        Color::White
    }
}

/// A patrolling enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
}

impl Enemy {
    pub fn new(x: f64, y: f64, direction: Direction) -> Enemy {
        Enemy {
            id: Uuid::new_v4().to_string(),
            x,
            y,
            direction,
        }
    }

    pub(crate) fn glyph(&self) -> char {
        'e'
    }

    pub(crate) fn color(&self) -> Color {
        Color::Red
    }
}

/// A live bomb. The blast range is captured from the player at placement
/// time; later range pickups do not affect it.
#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub id: String,
    pub x: usize,
    pub y: usize,
    pub timer: u32,
    pub range: usize,
}

impl Bomb {
    pub fn new(x: usize, y: usize, fuse: u32, range: usize) -> Bomb {
        Bomb {
            id: Uuid::new_v4().to_string(),
            x,
            y,
            timer: fuse,
            range,
        }
    }

    pub(crate) fn glyph(&self) -> char {
        'o'
    }

    pub(crate) fn color(&self) -> Color {
        Color::DarkRed
    }
}

/// One burning cell of a blast.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: usize,
    pub y: usize,
    pub timer: u32,
}

impl Explosion {
    pub fn new(x: usize, y: usize, timer: u32) -> Explosion {
        Explosion { x, y, timer }
    }

    pub(crate) fn glyph(&self) -> char {
        '*'
    }

    pub(crate) fn color(&self) -> Color {
        Color::Yellow
    }
}
