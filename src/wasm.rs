//! JavaScript bindings.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::codec;
use crate::session::{GameSession, SessionError};
use crate::types::{Disk, GameView, Position};

/// Result of a placement request as seen from JavaScript.
///
/// Contract:
/// - Rejected move: `accepted == false`, `flipped` is empty, `error` is set.
/// - Accepted move: `flipped` lists captured disks, `error` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementView {
    pub accepted: bool,
    pub flipped: Vec<Position>,
    pub error: Option<String>,
    pub state: GameView,
}

#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

impl WasmGame {
    fn placement_view(&self, result: Result<Vec<Position>, SessionError>) -> PlacementView {
        let (accepted, flipped, error) = match result {
            Ok(flipped) => (true, flipped, None),
            Err(err) => (false, Vec::new(), Some(err.to_string())),
        };
        PlacementView {
            accepted,
            flipped,
            error,
            state: self.session.state().to_view(),
        }
    }
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            session: GameSession::new(),
        }
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        self.session.new_game();
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.state().to_view())
    }

    /// Places a disk for the side to move at column `x`, row `y`.
    pub fn place(&mut self, x: i32, y: i32) -> Result<JsValue, JsValue> {
        let result = self.session.place(Position::new(x, y));
        to_js(&self.placement_view(result))
    }

    /// Toggles a side between manual and computer. Returns true when the
    /// side is now computer-controlled.
    #[wasm_bindgen(js_name = togglePlayerMode)]
    pub fn toggle_player_mode(&mut self, dark: bool) -> bool {
        let side = if dark { Disk::Dark } else { Disk::Light };
        self.session.toggle_player_mode(side) == crate::types::PlayerMode::Computer
    }

    #[wasm_bindgen(js_name = startComputerTurn)]
    pub fn start_computer_turn(&mut self) -> bool {
        self.session.start_computer_turn(Instant::now())
    }

    /// Returns the placement once the thinking delay has passed, `null` before.
    /// A rejected computer move comes back with `accepted: false`.
    #[wasm_bindgen(js_name = pollComputerTurn)]
    pub fn poll_computer_turn(&mut self) -> Result<JsValue, JsValue> {
        match self.session.poll_computer_turn(Instant::now()) {
            Ok(Some(flipped)) => to_js(&self.placement_view(Ok(flipped))),
            Ok(None) => Ok(JsValue::NULL),
            Err(err) => to_js(&self.placement_view(Err(err))),
        }
    }

    #[wasm_bindgen(js_name = cancelComputerTurns)]
    pub fn cancel_computer_turns(&mut self) {
        self.session.cancel_computer_turns();
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.drain_events())
    }

    /// Save text in the `x00` + 8 rows format.
    pub fn save(&self) -> String {
        codec::encode(self.session.state())
    }

    pub fn load(&mut self, text: &str) -> Result<(), JsValue> {
        let state = codec::decode(text).map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.session.restore(state);
        Ok(())
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}
