use wasm_bindgen::prelude::*;

pub mod ai;
pub mod animation;
pub mod board;
pub mod codec;
pub mod game;
pub mod repository;
pub mod rules;
pub mod session;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use codec::{FormatError, decode, decode_bytes, encode};
pub use game::{GameState, MoveError, Placement, Transition, advance};
pub use repository::{FileGameRepository, GameRepository, RepositoryError};
pub use session::{GameEvent, GameSession, SessionError};
pub use types::{Disk, PlayerMode, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
