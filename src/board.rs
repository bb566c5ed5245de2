use crate::entities::{Bomb, Enemy, Explosion, Player};
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};

/// The single rounding rule for mapping continuous positions to grid cells.
/// Every subsystem that touches the grid goes through this.
pub(crate) fn to_grid(value: f64) -> i32 {
    value.round() as i32
}

/// The kind of a single board cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tile {
    Floor,
    Wall,
    Crate,
    Explosion,
    PowerUpBomb,
    PowerUpRange,
    PowerUpSpeed,
    Exit,
}

impl Tile {
    /// Power-ups and the exit: consumed when stepped on, and they stop a
    /// blast ray the way the crate that hid them did.
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            Tile::PowerUpBomb | Tile::PowerUpRange | Tile::PowerUpSpeed | Tile::Exit
        )
    }

    pub fn blocks_movement(&self) -> bool {
        matches!(self, Tile::Wall | Tile::Crate)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tile::Floor => "Floor",
            Tile::Wall => "Wall",
            Tile::Crate => "Crate",
            Tile::Explosion => "Explosion",
            Tile::PowerUpBomb => "PowerUpBomb",
            Tile::PowerUpRange => "PowerUpRange",
            Tile::PowerUpSpeed => "PowerUpSpeed",
            Tile::Exit => "Exit",
        }
    }

    fn glyph(&self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::Crate => '+',
            Tile::Explosion => '*',
            Tile::PowerUpBomb => 'b',
            Tile::PowerUpRange => 'r',
            Tile::PowerUpSpeed => 's',
            Tile::Exit => 'X',
        }
    }

    fn color(&self) -> Color {
        match self {
            Tile::Floor => Color::Grey,
            Tile::Wall => Color::DarkGrey,
            Tile::Crate => Color::DarkYellow,
            Tile::Explosion => Color::Yellow,
            Tile::PowerUpBomb => Color::Cyan,
            Tile::PowerUpRange => Color::Magenta,
            Tile::PowerUpSpeed => Color::Green,
            Tile::Exit => Color::Blue,
        }
    }
}

/// A fixed-size grid of tiles plus a concealed layer of the same shape.
///
/// The concealed layer holds the content generation hid under crates. It is
/// never rendered; destroying a crate is the only way its cell surfaces.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    concealed: Vec<Tile>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Board {
        Board {
            width,
            height,
            tiles: vec![Tile::Floor; width * height],
            concealed: vec![Tile::Floor; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[y * self.width + x])
    }

    /// Signed lookup for ray walks and movement candidates. Out of bounds is
    /// `None`, which every caller treats as blocked.
    pub fn tile_at(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as usize, y as usize)
    }

    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        self.tiles[y * self.width + x] = tile;
    }

    /// Hides `tile` under the crate at (x, y). Only generation calls this.
    pub(crate) fn conceal(&mut self, x: usize, y: usize, tile: Tile) {
        self.concealed[y * self.width + x] = tile;
    }

    pub(crate) fn concealed_at(&self, x: usize, y: usize) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.concealed[y * self.width + x])
    }

    /// Destroys the crate at (x, y), surfacing its concealed content if any.
    /// Returns the tile the cell now shows.
    pub(crate) fn destroy_crate(&mut self, x: usize, y: usize) -> Tile {
        let revealed = match self.concealed_at(x, y) {
            Some(tile) if tile.is_special() => tile,
            _ => Tile::Floor,
        };
        self.set(x, y, revealed);
        revealed
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells_of(&self, tile: Tile) -> Vec<(usize, usize)> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| {
                if *cell == tile {
                    Some((index % self.width, index / self.width))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn floor_cells(&self) -> Vec<(usize, usize)> {
        self.cells_of(Tile::Floor)
    }

    /// Draws the board and everything on it to the console.
    pub(crate) fn draw(
        &self,
        level: usize,
        score: usize,
        player: &Player,
        enemies: &[Enemy],
        bombs: &[Bomb],
        explosions: &[Explosion],
    ) {
        let mut stdout = stdout();

        execute!(
            stdout,
            Clear(ClearType::All),
            Hide,
            Print("Level: "),
            Print(level.to_string()),
            Print("  Score: "),
            Print(score.to_string()),
            Print("  Enemies: "),
            Print(enemies.len().to_string()),
            Print("\n\n")
        )
        .unwrap();

        for y in 0..self.height {
            for x in 0..self.width {
                let (glyph, color) = self.cell_appearance(x, y, player, enemies, bombs, explosions);
                execute!(
                    stdout,
                    SetForegroundColor(color),
                    Print(glyph),
                    SetForegroundColor(Color::Reset)
                )
                .unwrap();
            }
            execute!(stdout, Print("\n")).unwrap();
        }

        stdout.flush().unwrap();
    }

    fn cell_appearance(
        &self,
        x: usize,
        y: usize,
        player: &Player,
        enemies: &[Enemy],
        bombs: &[Bomb],
        explosions: &[Explosion],
    ) -> (char, Color) {
        let occupies = |ex: f64, ey: f64| to_grid(ex) == x as i32 && to_grid(ey) == y as i32;

        if player.alive && occupies(player.x, player.y) {
            return (player.glyph(), player.color());
        }
        if let Some(enemy) = enemies.iter().find(|enemy| occupies(enemy.x, enemy.y)) {
            return (enemy.glyph(), enemy.color());
        }
        if let Some(bomb) = bombs.iter().find(|bomb| (bomb.x, bomb.y) == (x, y)) {
            return (bomb.glyph(), bomb.color());
        }
        if let Some(explosion) = explosions
            .iter()
            .find(|explosion| (explosion.x, explosion.y) == (x, y))
        {
            return (explosion.glyph(), explosion.color());
        }

        let tile = self.tiles[y * self.width + x];
        (tile.glyph(), tile.color())
    }
}
