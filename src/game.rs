use crate::board::{to_grid, Board, Tile};
use crate::entities::{Bomb, Direction, Enemy, Explosion, Player, ENEMY_SPEED};
use crate::level;
use crate::replay::{create_replay_logger, ReplayLogger};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

const SPEED_POWERUP_FACTOR: f64 = 1.2;

/// The Blast & Dash game.
/// Main entry point for running the simulation.
///
/// A driver feeds one [`Action`] per logical event into [`Game::update`] and
/// receives the resulting [`GameState`] snapshot. Ticks are expected at a
/// fixed logical rate (60 Hz in the reference driver) while the status is
/// [`GameStatus::Playing`].
pub struct Game {
    state: GameState,
    bomb_fuse: u32,
    explosion_duration: u32,
    score_per_kill: usize,
    ticks: usize,
    replay_logger: Box<dyn ReplayLogger>,
    rng: StdRng,
}

/// Represents the full state of the game after a transition.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// The visible tile layer.
    pub board: Board,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    pub status: GameStatus,
    /// The current level, starting at 1.
    pub level: usize,
    /// Cumulative score across levels.
    pub score: usize,
}

impl GameState {
    fn initial() -> GameState {
        GameState {
            board: Board::new(level::GRID_WIDTH, level::GRID_HEIGHT),
            player: Player::new(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            explosions: Vec::new(),
            status: GameStatus::StartMenu,
            level: 1,
            score: 0,
        }
    }
}

/// Represents the lifecycle phase of the game.
///
/// `Won` and `Lost` are terminal: ticks and player intents are ignored until
/// the driver starts or resets the game.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GameStatus {
    StartMenu,
    Playing,
    Won,
    Lost,
}

/// Represents a discrete input to the simulation.
///
/// `Move` carries the intent vector from the input layer; the engine scales
/// it by the player's speed. Invalid actions are silently ignored and return
/// the state unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    StartGame,
    NextLevel,
    ResetGame,
    Move { dx: f64, dy: f64 },
    PlaceBomb,
    Tick,
}

impl Game {
    /// Creates a new game sitting at the start menu.
    ///
    /// # Arguments
    /// * `seed` - The seed for the random number generator.
    /// * `replay_filename` - The filename to save the replay of the game to.
    ///   If `None`, no replay will be saved.
    pub fn new(seed: u64, replay_filename: Option<String>) -> Game {
        Game {
            state: GameState::initial(),
            bomb_fuse: 120,
            explosion_duration: 30,
            score_per_kill: 100,
            ticks: 0,
            replay_logger: create_replay_logger(
                replay_filename,
                level::GRID_WIDTH,
                level::GRID_HEIGHT,
            ),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Applies one action and returns the resulting state snapshot.
    pub fn update(&mut self, action: Action) -> GameState {
        match action {
            Action::StartGame => self.start_game(),
            Action::NextLevel => self.next_level(),
            Action::ResetGame => self.reset_game(),
            Action::Move { dx, dy } => self.move_player(dx, dy),
            Action::PlaceBomb => self.place_bomb(),
            Action::Tick => self.tick(),
        }

        self.state.clone()
    }

    /// The current state, without applying an action.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Draws the game to the console.
    pub fn draw(&self) {
        self.state.board.draw(
            self.state.level,
            self.state.score,
            &self.state.player,
            &self.state.enemies,
            &self.state.bombs,
            &self.state.explosions,
        );
    }
}

impl Game {
    fn start_game(&mut self) {
        let (board, enemies) = level::generate(1, &mut self.rng);

        self.state = GameState {
            board,
            player: Player::new(),
            enemies,
            bombs: Vec::new(),
            explosions: Vec::new(),
            status: GameStatus::Playing,
            level: 1,
            score: 0,
        };
        self.ticks = 0;

        self.replay_logger.clear();
        self.replay_logger.log_level_start(self.ticks, 1);
    }

    fn next_level(&mut self) {
        let next = self.state.level + 1;

        if next > level::LEVEL_COUNT {
            self.state.status = GameStatus::Won;
            self.replay_logger.log_end_game("Won".to_string());
            self.replay_logger.save();
            return;
        }

        let (board, enemies) = level::generate(next, &mut self.rng);

        self.state.level = next;
        self.state.board = board;
        self.state.enemies = enemies;
        self.state.bombs.clear();
        self.state.explosions.clear();
        self.state.player.respawn();
        self.state.status = GameStatus::Playing;

        self.replay_logger.log_level_start(self.ticks, next);
    }

    fn reset_game(&mut self) {
        self.state = GameState::initial();
        self.ticks = 0;
    }

    fn move_player(&mut self, dx: f64, dy: f64) {
        if self.state.status != GameStatus::Playing || !self.state.player.alive {
            return;
        }

        let next_x = self.state.player.x + dx * self.state.player.speed;
        let next_y = self.state.player.y + dy * self.state.player.speed;
        let (gx, gy) = (to_grid(next_x), to_grid(next_y));

        // Out of bounds reads back as None and blocks like a wall.
        let tile = match self.state.board.tile_at(gx, gy) {
            Some(tile) if !tile.blocks_movement() => tile,
            _ => return,
        };

        self.state.player.x = next_x;
        self.state.player.y = next_y;

        let cell = (gx as usize, gy as usize);
        match tile {
            Tile::PowerUpBomb => {
                self.state.player.bombs_max += 1;
                self.consume(cell, tile);
            }
            Tile::PowerUpRange => {
                self.state.player.range += 1;
                self.consume(cell, tile);
            }
            Tile::PowerUpSpeed => {
                self.state.player.speed *= SPEED_POWERUP_FACTOR;
                self.consume(cell, tile);
            }
            // The exit only opens once the board is clear of enemies; until
            // then the cell stays on the board untouched.
            Tile::Exit if self.state.enemies.is_empty() => {
                self.next_level();
                return;
            }
            _ => {}
        }

        self.state.player.bombs_left = self
            .state
            .player
            .bombs_max
            .saturating_sub(self.state.bombs.len());
    }

    fn consume(&mut self, cell: (usize, usize), tile: Tile) {
        self.state.board.set(cell.0, cell.1, Tile::Floor);
        self.replay_logger.log_consume(self.ticks, tile.name(), cell);
    }

    fn place_bomb(&mut self) {
        if self.state.status != GameStatus::Playing
            || !self.state.player.alive
            || self.state.player.bombs_left == 0
        {
            return;
        }

        let x = to_grid(self.state.player.x) as usize;
        let y = to_grid(self.state.player.y) as usize;

        // One bomb per cell.
        if self.state.bombs.iter().any(|bomb| (bomb.x, bomb.y) == (x, y)) {
            return;
        }

        let bomb = Bomb::new(x, y, self.bomb_fuse, self.state.player.range);
        self.replay_logger
            .log_place_bomb(self.ticks, bomb.id.clone(), (x, y));
        self.state.bombs.push(bomb);
        self.state.player.bombs_left -= 1;
    }

    fn tick(&mut self) {
        if self.state.status != GameStatus::Playing {
            return;
        }
        self.ticks += 1;

        // Phase order matters: collisions must see the fully updated board,
        // explosion set and enemy positions for this tick.
        self.advance_bombs();
        self.advance_explosions();
        self.move_enemies();
        self.resolve_collisions();

        self.state.player.bombs_left = self
            .state
            .player
            .bombs_max
            .saturating_sub(self.state.bombs.len());

        self.replay_logger.log_turn(
            self.ticks,
            self.state.level,
            self.state.score,
            self.state.enemies.len(),
        );

        if self.state.status == GameStatus::Lost {
            self.replay_logger.log_end_game("Lost".to_string());
            self.replay_logger.save();
        }
    }

    /// Counts down bomb fuses and detonates every expired bomb, including
    /// bombs caught in another blast during the same tick.
    fn advance_bombs(&mut self) {
        let mut pending = VecDeque::new();
        let mut live = Vec::with_capacity(self.state.bombs.len());

        for mut bomb in std::mem::take(&mut self.state.bombs) {
            bomb.timer = bomb.timer.saturating_sub(1);
            if bomb.timer == 0 {
                pending.push_back(bomb);
            } else {
                live.push(bomb);
            }
        }
        self.state.bombs = live;

        // The queue grows while it drains: a ray that reaches a live bomb
        // pulls it out of the live list and schedules it for this same tick.
        while let Some(bomb) = pending.pop_front() {
            self.replay_logger
                .log_detonate_bomb(self.ticks, bomb.id.clone(), (bomb.x, bomb.y));

            self.state
                .explosions
                .push(Explosion::new(bomb.x, bomb.y, self.explosion_duration));
            self.state.board.set(bomb.x, bomb.y, Tile::Explosion);

            for direction in Direction::ALL {
                let (dx, dy) = direction.offset();
                for step in 1..=bomb.range as i32 {
                    let x = bomb.x as i32 + dx * step;
                    let y = bomb.y as i32 + dy * step;

                    // A wall stops the ray with nothing emitted; so does the
                    // board edge.
                    let tile = match self.state.board.tile_at(x, y) {
                        Some(tile) if tile != Tile::Wall => tile,
                        _ => break,
                    };
                    let cell = (x as usize, y as usize);

                    if let Some(index) = self
                        .state
                        .bombs
                        .iter()
                        .position(|other| (other.x, other.y) == cell)
                    {
                        pending.push_back(self.state.bombs.remove(index));
                    }

                    self.state
                        .explosions
                        .push(Explosion::new(cell.0, cell.1, self.explosion_duration));

                    if tile == Tile::Crate {
                        let revealed = self.state.board.destroy_crate(cell.0, cell.1);
                        if revealed != Tile::Floor {
                            self.replay_logger
                                .log_reveal(self.ticks, revealed.name(), cell);
                        }
                        break;
                    }

                    // A revealed power-up or exit blocks the blast just like
                    // the crate that used to hide it.
                    if tile.is_special() {
                        break;
                    }
                }
            }
        }
    }

    fn advance_explosions(&mut self) {
        let state = &mut self.state;

        for explosion in &mut state.explosions {
            explosion.timer = explosion.timer.saturating_sub(1);
        }

        let board = &mut state.board;
        state.explosions.retain(|explosion| {
            if explosion.timer > 0 {
                return true;
            }
            // Revert the cell unless a reveal or consumption replaced it.
            if board.get(explosion.x, explosion.y) == Some(Tile::Explosion) {
                board.set(explosion.x, explosion.y, Tile::Floor);
            }
            false
        });
    }

    fn move_enemies(&mut self) {
        let state = &mut self.state;

        for enemy in &mut state.enemies {
            let (dx, dy) = enemy.direction.offset();
            let next_x = enemy.x + dx as f64 * ENEMY_SPEED;
            let next_y = enemy.y + dy as f64 * ENEMY_SPEED;

            let blocked = match state.board.tile_at(to_grid(next_x), to_grid(next_y)) {
                Some(tile) => tile.blocks_movement(),
                None => true,
            };

            if blocked {
                enemy.direction = self.rng.gen();
            } else {
                enemy.x = next_x;
                enemy.y = next_y;
            }
        }
    }

    fn resolve_collisions(&mut self) {
        let blast: Vec<(i32, i32)> = self
            .state
            .explosions
            .iter()
            .map(|explosion| (explosion.x as i32, explosion.y as i32))
            .collect();

        let px = to_grid(self.state.player.x);
        let py = to_grid(self.state.player.y);

        // The player check runs against the pre-kill enemy list, so an enemy
        // dying in the same blast still takes the player with it.
        let mut player_alive = self.state.player.alive;
        if blast.contains(&(px, py)) {
            player_alive = false;
        }
        if self
            .state
            .enemies
            .iter()
            .any(|enemy| (to_grid(enemy.x), to_grid(enemy.y)) == (px, py))
        {
            player_alive = false;
        }

        let (killed, survivors): (Vec<Enemy>, Vec<Enemy>) =
            std::mem::take(&mut self.state.enemies)
                .into_iter()
                .partition(|enemy| blast.contains(&(to_grid(enemy.x), to_grid(enemy.y))));
        self.state.enemies = survivors;

        for enemy in killed {
            self.state.score += self.score_per_kill;
            let cell = (to_grid(enemy.x) as usize, to_grid(enemy.y) as usize);
            self.replay_logger.log_kill_enemy(self.ticks, enemy.id, cell);
        }

        if self.state.player.alive && !player_alive {
            self.state.player.alive = false;
            self.state.status = GameStatus::Lost;
            self.replay_logger
                .log_player_death(self.ticks, (px as usize, py as usize));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_game() -> Game {
        let mut game = Game::new(0, None);
        game.update(Action::StartGame);
        game
    }

    /// A started game on an all-floor board with no enemies, for crafting
    /// exact blast and movement scenarios.
    fn open_arena() -> Game {
        let mut game = started_game();
        game.state.board = Board::new(level::GRID_WIDTH, level::GRID_HEIGHT);
        game.state.enemies.clear();
        game
    }

    #[test]
    fn when_starting_a_game_the_first_level_begins_fresh() {
        let game = started_game();
        let state = game.state();

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.player, Player::new());
        assert_eq!(state.enemies.len(), 3);
        assert!(state.bombs.is_empty());
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn when_resetting_a_game_the_state_returns_to_the_start_menu() {
        let mut game = started_game();
        game.update(Action::Tick);
        game.update(Action::PlaceBomb);

        let state = game.update(Action::ResetGame);

        assert_eq!(state, GameState::initial());
    }

    #[test]
    fn when_moving_in_the_start_menu_the_action_is_ignored() {
        let mut game = Game::new(0, None);
        let before = game.state().clone();

        game.update(Action::Move { dx: 1.0, dy: 0.0 });
        game.update(Action::PlaceBomb);
        game.update(Action::Tick);

        assert_eq!(*game.state(), before);
    }

    #[test]
    fn when_moving_into_a_wall_the_state_is_unchanged() {
        let mut game = started_game();
        game.state.player.x = 0.6;
        let before = game.state().clone();

        let state = game.update(Action::Move { dx: -1.0, dy: 0.0 });

        assert_eq!(state, before);
    }

    #[test]
    fn when_moving_into_a_crate_the_state_is_unchanged() {
        let mut game = started_game();
        game.state.board.set(2, 1, Tile::Crate);
        game.state.player.x = 1.4;
        let before = game.state().clone();

        let state = game.update(Action::Move { dx: 1.0, dy: 0.0 });

        assert_eq!(state, before);
    }

    #[test]
    fn when_moving_through_open_floor_the_player_advances_by_its_speed() {
        let mut game = started_game();

        game.update(Action::Move { dx: 0.0, dy: 1.0 });

        assert!((game.state().player.y - 1.12).abs() < 1e-9);
        assert!((game.state().player.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn when_moving_while_dead_the_action_is_ignored() {
        let mut game = started_game();
        game.state.player.alive = false;
        let before = game.state().clone();

        let state = game.update(Action::Move { dx: 1.0, dy: 0.0 });

        assert_eq!(state, before);
    }

    #[test]
    fn when_stepping_onto_a_bomb_power_up_capacity_grows_and_the_cell_clears() {
        let mut game = started_game();
        game.update(Action::PlaceBomb);
        game.state.board.set(2, 1, Tile::PowerUpBomb);
        game.state.player.x = 1.45;

        game.update(Action::Move { dx: 1.0, dy: 0.0 });

        let state = game.state();
        assert_eq!(state.player.bombs_max, 2);
        // One bomb is still live on the board.
        assert_eq!(state.player.bombs_left, 1);
        assert_eq!(state.board.get(2, 1), Some(Tile::Floor));
    }

    #[test]
    fn when_stepping_onto_a_range_power_up_later_bombs_capture_the_new_range() {
        let mut game = started_game();
        game.state.board.set(2, 1, Tile::PowerUpRange);
        game.state.player.x = 1.45;

        game.update(Action::Move { dx: 1.0, dy: 0.0 });

        assert_eq!(game.state().player.range, 2);
        assert_eq!(game.state().board.get(2, 1), Some(Tile::Floor));

        game.update(Action::PlaceBomb);

        assert_eq!(game.state().bombs.len(), 1);
        assert_eq!(game.state().bombs[0].range, 2);
    }

    #[test]
    fn when_stepping_onto_a_speed_power_up_the_speed_is_multiplied() {
        let mut game = started_game();
        game.state.board.set(2, 1, Tile::PowerUpSpeed);
        game.state.player.x = 1.45;

        game.update(Action::Move { dx: 1.0, dy: 0.0 });

        assert!((game.state().player.speed - 0.12 * 1.2).abs() < 1e-9);
        assert_eq!(game.state().board.get(2, 1), Some(Tile::Floor));
    }

    #[test]
    fn when_reaching_the_exit_with_enemies_remaining_the_level_does_not_advance() {
        let mut game = started_game();
        game.state.board.set(2, 1, Tile::Exit);
        game.state.player.x = 1.45;
        assert!(!game.state().enemies.is_empty());

        game.update(Action::Move { dx: 1.0, dy: 0.0 });

        let state = game.state();
        assert_eq!(state.level, 1);
        assert_eq!(state.status, GameStatus::Playing);
        // The exit stays on the board, inert.
        assert_eq!(state.board.get(2, 1), Some(Tile::Exit));
    }

    #[test]
    fn when_reaching_the_exit_with_no_enemies_the_next_level_starts() {
        let mut game = started_game();
        game.state.enemies.clear();
        game.state.board.set(2, 1, Tile::Exit);
        game.state.player.x = 1.45;
        game.state.player.range = 3;
        game.state.explosions.push(Explosion::new(5, 5, 10));

        game.update(Action::Move { dx: 1.0, dy: 0.0 });

        let state = game.state();
        assert_eq!(state.level, 2);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.enemies.len(), 4);
        assert!(state.bombs.is_empty());
        assert!(state.explosions.is_empty());
        // Upgrades persist across levels; the position does not.
        assert_eq!(state.player.range, 3);
        assert!((state.player.x - 1.0).abs() < 1e-9);
        assert!((state.player.y - 1.0).abs() < 1e-9);
        assert_eq!(state.player.bombs_left, state.player.bombs_max);
    }

    #[test]
    fn when_advancing_past_the_last_level_the_game_is_won_and_the_board_is_kept() {
        let mut game = started_game();
        game.state.level = 3;
        let board_before = game.state().board.clone();

        game.update(Action::NextLevel);

        assert_eq!(game.state().status, GameStatus::Won);
        assert_eq!(game.state().board, board_before);

        // Terminal: further ticks and intents change nothing.
        let before = game.state().clone();
        game.update(Action::Tick);
        game.update(Action::Move { dx: 1.0, dy: 0.0 });
        game.update(Action::PlaceBomb);
        assert_eq!(*game.state(), before);
    }

    #[test]
    fn when_placing_a_bomb_it_captures_the_players_cell_and_range() {
        let mut game = started_game();

        game.update(Action::PlaceBomb);

        let state = game.state();
        assert_eq!(state.bombs.len(), 1);
        assert_eq!((state.bombs[0].x, state.bombs[0].y), (1, 1));
        assert_eq!(state.bombs[0].timer, 120);
        assert_eq!(state.bombs[0].range, 1);
        assert_eq!(state.player.bombs_left, 0);
    }

    #[test]
    fn when_placing_a_bomb_with_none_available_the_action_is_ignored() {
        let mut game = started_game();
        game.state.player.bombs_left = 0;
        let before = game.state().clone();

        let state = game.update(Action::PlaceBomb);

        assert_eq!(state, before);
    }

    #[test]
    fn when_placing_a_bomb_on_an_occupied_cell_the_action_is_ignored() {
        let mut game = started_game();
        game.state.player.bombs_max = 2;
        game.state.player.bombs_left = 2;

        game.update(Action::PlaceBomb);
        game.update(Action::PlaceBomb);

        assert_eq!(game.state().bombs.len(), 1);
        assert_eq!(game.state().player.bombs_left, 1);
    }

    #[test]
    fn when_the_fuse_expires_the_bomb_detonates_and_the_blast_later_clears() {
        let mut game = open_arena();
        game.state.player.x = 7.0;
        game.state.player.y = 7.0;
        game.state.player.range = 2;
        game.update(Action::PlaceBomb);

        // Step out of the blast before the fuse runs down.
        game.state.player.x = 1.0;
        game.state.player.y = 1.0;

        for _ in 0..119 {
            game.update(Action::Tick);
        }
        assert_eq!(game.state().bombs.len(), 1);
        assert!(game.state().explosions.is_empty());

        game.update(Action::Tick);

        let state = game.state();
        assert!(state.bombs.is_empty());
        let mut cells: Vec<(usize, usize)> = state
            .explosions
            .iter()
            .map(|explosion| (explosion.x, explosion.y))
            .collect();
        cells.sort_unstable();
        let mut expected = vec![
            (7, 7),
            (6, 7),
            (5, 7),
            (8, 7),
            (9, 7),
            (7, 6),
            (7, 5),
            (7, 8),
            (7, 9),
        ];
        expected.sort_unstable();
        assert_eq!(cells, expected);
        assert_eq!(state.board.get(7, 7), Some(Tile::Explosion));

        for _ in 0..30 {
            game.update(Action::Tick);
        }
        assert!(game.state().explosions.is_empty());
        assert_eq!(game.state().board.get(7, 7), Some(Tile::Floor));
        assert_eq!(game.state().board.get(9, 7), Some(Tile::Floor));
    }

    #[test]
    fn when_a_blast_meets_a_wall_no_cell_is_emitted_at_or_beyond_it() {
        let mut game = open_arena();
        game.state.board.set(4, 1, Tile::Wall);
        game.state.bombs.push(Bomb::new(1, 1, 1, 5));
        game.state.player.x = 10.0;
        game.state.player.y = 10.0;

        game.update(Action::Tick);

        let cells: Vec<(usize, usize)> = game
            .state()
            .explosions
            .iter()
            .map(|explosion| (explosion.x, explosion.y))
            .collect();
        assert!(cells.contains(&(2, 1)));
        assert!(cells.contains(&(3, 1)));
        assert!(!cells.contains(&(4, 1)));
        assert!(!cells.contains(&(5, 1)));
    }

    #[test]
    fn when_a_blast_meets_a_crate_the_crate_is_destroyed_and_the_ray_stops() {
        let mut game = open_arena();
        game.state.board.set(3, 1, Tile::Crate);
        game.state.bombs.push(Bomb::new(1, 1, 1, 3));
        game.state.player.x = 10.0;
        game.state.player.y = 10.0;

        game.update(Action::Tick);

        let cells: Vec<(usize, usize)> = game
            .state()
            .explosions
            .iter()
            .map(|explosion| (explosion.x, explosion.y))
            .collect();
        assert!(cells.contains(&(3, 1)));
        assert!(!cells.contains(&(4, 1)));
        assert_eq!(game.state().board.get(3, 1), Some(Tile::Floor));
    }

    #[test]
    fn when_a_destroyed_crate_conceals_a_power_up_it_is_revealed_and_survives_the_blast() {
        let mut game = open_arena();
        game.state.board.set(3, 1, Tile::Crate);
        game.state.board.conceal(3, 1, Tile::PowerUpSpeed);
        game.state.bombs.push(Bomb::new(1, 1, 1, 3));
        game.state.player.x = 10.0;
        game.state.player.y = 10.0;

        game.update(Action::Tick);
        assert_eq!(game.state().board.get(3, 1), Some(Tile::PowerUpSpeed));

        for _ in 0..30 {
            game.update(Action::Tick);
        }
        assert!(game.state().explosions.is_empty());
        assert_eq!(game.state().board.get(3, 1), Some(Tile::PowerUpSpeed));
    }

    #[test]
    fn when_a_blast_reaches_other_bombs_the_whole_chain_detonates_in_one_tick() {
        let mut game = open_arena();
        game.state.bombs.push(Bomb::new(1, 1, 1, 1));
        game.state.bombs.push(Bomb::new(2, 1, 120, 1));
        game.state.bombs.push(Bomb::new(3, 1, 120, 1));
        game.state.player.x = 10.0;
        game.state.player.y = 10.0;

        game.update(Action::Tick);

        let state = game.state();
        assert!(state.bombs.is_empty());
        let cells: Vec<(usize, usize)> = state
            .explosions
            .iter()
            .map(|explosion| (explosion.x, explosion.y))
            .collect();
        assert!(cells.contains(&(1, 1)));
        assert!(cells.contains(&(2, 1)));
        assert!(cells.contains(&(3, 1)));
        assert!(cells.contains(&(4, 1)));
    }

    #[test]
    fn when_ticking_the_bomb_stock_always_balances_against_live_bombs() {
        let mut game = open_arena();
        game.state.player.bombs_max = 2;
        game.state.player.bombs_left = 2;

        game.update(Action::PlaceBomb);
        game.state.player.x = 10.0;
        game.state.player.y = 10.0;

        let state = game.state();
        assert_eq!(state.player.bombs_left + state.bombs.len(), 2);

        for _ in 0..160 {
            game.update(Action::Tick);
            let state = game.state();
            assert_eq!(
                state.player.bombs_left + state.bombs.len(),
                state.player.bombs_max
            );
        }
        // The bomb has long detonated and the stock is whole again.
        assert_eq!(game.state().player.bombs_left, 2);
    }

    #[test]
    fn when_an_enemy_is_caught_in_a_blast_it_dies_and_the_kill_is_scored() {
        let mut game = open_arena();
        game.state.enemies.push(Enemy::new(8.0, 8.0, Direction::Up));
        game.state.bombs.push(Bomb::new(8, 8, 1, 1));

        game.update(Action::Tick);

        assert!(game.state().enemies.is_empty());
        assert_eq!(game.state().score, 100);
        assert_eq!(game.state().status, GameStatus::Playing);
    }

    #[test]
    fn when_the_player_is_caught_in_a_blast_the_game_is_lost() {
        let mut game = open_arena();
        game.state.bombs.push(Bomb::new(1, 1, 1, 1));

        game.update(Action::Tick);

        assert!(!game.state().player.alive);
        assert_eq!(game.state().status, GameStatus::Lost);

        // Terminal: further ticks and intents change nothing.
        let before = game.state().clone();
        game.update(Action::Tick);
        game.update(Action::Move { dx: 1.0, dy: 0.0 });
        game.update(Action::PlaceBomb);
        assert_eq!(*game.state(), before);
    }

    #[test]
    fn when_an_enemy_reaches_the_player_the_game_is_lost() {
        let mut game = open_arena();
        game.state.enemies.push(Enemy::new(1.0, 1.0, Direction::Up));

        game.update(Action::Tick);

        assert!(!game.state().player.alive);
        assert_eq!(game.state().status, GameStatus::Lost);
    }

    #[test]
    fn when_an_enemy_is_blocked_it_stays_in_place_and_picks_a_new_direction() {
        let mut game = open_arena();
        game.state.board.set(2, 1, Tile::Wall);
        game.state
            .enemies
            .push(Enemy::new(1.45, 1.0, Direction::Right));
        game.state.player.x = 10.0;
        game.state.player.y = 10.0;

        game.update(Action::Tick);

        let enemy = &game.state().enemies[0];
        assert!((enemy.x - 1.45).abs() < 1e-9);
        assert!((enemy.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn when_an_enemy_would_leave_the_board_it_is_blocked_like_a_wall() {
        let mut game = open_arena();
        game.state
            .enemies
            .push(Enemy::new(1.0, -0.45, Direction::Up));

        game.update(Action::Tick);

        let enemy = &game.state().enemies[0];
        assert!((enemy.x - 1.0).abs() < 1e-9);
        assert!((enemy.y + 0.45).abs() < 1e-9);
    }
}
