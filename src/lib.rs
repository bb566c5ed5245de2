//! # blast_engine
//!
//! The core simulation engine for Blast & Dash, a tile-based arena bomber.
//! A driver feeds discrete actions (ticks and player intents) into [`Game`]
//! and reads back an immutable [`GameState`] snapshot to render each frame.

pub mod game;
pub use game::Action;
pub use game::Game;
pub use game::GameState;
pub use game::GameStatus;

mod board;
mod entities;
mod level;
mod replay;

pub use board::Board;
pub use board::Tile;
pub use entities::Bomb;
pub use entities::Direction;
pub use entities::Enemy;
pub use entities::Explosion;
pub use entities::Player;
