//! WASM bindings for Gateboard Core.
//!
//! This module exposes a [`Session`] to a browser front end. The view layer
//! keeps rendering and pointer handling; every edit goes through
//! [`WasmBoard`] and the returned flag says whether to redraw.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmBoard } from 'gateboard_core';
//!
//! await init();
//!
//! const board = new WasmBoard();
//! const a = board.add_input_source();
//! const b = board.add_input_source();
//! const g = board.add_gate("AND");
//! board.create_connection(a, g, 0);
//! board.create_connection(b, g, 1);
//!
//! // In a pointer handler:
//! if (board.toggle_input_source(a)) redraw();
//! board.output_of(g); // false until b is toggled too
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{GateType, Point};
use crate::engine::{Session, SessionConfig, Update};
use crate::error::BoardError;
use crate::layout::{self, Terminal};
use crate::report::BoardReport;
use crate::script::{self, Runner};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(e: BoardError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible logic gate board.
///
/// Edits follow the lenient API: invalid edits are ignored and return
/// `false`.
#[wasm_bindgen]
pub struct WasmBoard {
    session: Session,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create an empty board.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBoard {
        WasmBoard {
            session: Session::new(),
        }
    }

    /// Create an empty board with custom propagation settings.
    ///
    /// # Arguments
    /// * `rounds` - Rounds per propagation pass (default: 5)
    /// * `max_passes` - Passes per edit (default: 1)
    #[wasm_bindgen]
    pub fn with_config(rounds: usize, max_passes: usize) -> WasmBoard {
        let config = SessionConfig::new()
            .with_rounds(rounds)
            .with_max_passes(max_passes);
        WasmBoard {
            session: Session::with_config(config),
        }
    }

    /// Create a board by replaying a command script.
    #[wasm_bindgen]
    pub fn from_script(source: &str) -> Result<WasmBoard, JsValue> {
        let script = script::parse(source).map_err(to_js)?;
        let mut session = Session::new();
        Runner::new(&mut session).run(&script).map_err(to_js)?;
        Ok(WasmBoard { session })
    }

    /// Add a source and return its id.
    #[wasm_bindgen]
    pub fn add_input_source(&mut self) -> String {
        self.session.add_input_source().0
    }

    /// Add a gate by type name (`AND`, `OR`, `NAND`, `XOR`, `NOT`) and return
    /// its id.
    #[wasm_bindgen]
    pub fn add_gate(&mut self, gate_type: &str) -> Result<String, JsValue> {
        let gate_type = GateType::from_keyword(gate_type).ok_or_else(|| {
            to_js(BoardError::WasmError {
                message: format!("unknown gate type '{}'", gate_type),
            })
        })?;
        Ok(self.session.add_gate(gate_type).0)
    }

    /// Flip a source. Returns whether a redraw is needed.
    #[wasm_bindgen]
    pub fn toggle_input_source(&mut self, id: &str) -> bool {
        redraw(self.session.toggle_input_source(id))
    }

    #[wasm_bindgen]
    pub fn create_connection(&mut self, from_id: &str, to_gate: &str, to_terminal: usize) -> bool {
        redraw(self.session.create_connection(from_id, to_gate, to_terminal))
    }

    #[wasm_bindgen]
    pub fn delete_connection(&mut self, id: &str) -> bool {
        redraw(self.session.delete_connection(id))
    }

    #[wasm_bindgen]
    pub fn update_component_position(&mut self, id: &str, x: f64, y: f64) -> bool {
        redraw(self.session.update_component_position(id, Point::new(x, y)))
    }

    #[wasm_bindgen]
    pub fn delete_component(&mut self, id: &str) -> bool {
        redraw(self.session.delete_component(id))
    }

    /// A source's value or a gate's output, `undefined` for unknown ids.
    #[wasm_bindgen]
    pub fn output_of(&self, id: &str) -> Option<bool> {
        self.session.output_of(id)
    }

    /// A gate's input signals encoded per terminal: 1 high, 0 low, -1
    /// undetermined. Empty for unknown ids.
    #[wasm_bindgen]
    pub fn inputs_of(&self, gate_id: &str) -> Vec<i8> {
        self.session
            .logic(gate_id)
            .map(|logic| {
                logic
                    .inputs
                    .iter()
                    .map(|s| match s {
                        Some(true) => 1,
                        Some(false) => 0,
                        None => -1,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Level carried by a wire, for colouring it.
    #[wasm_bindgen]
    pub fn connection_signal(&self, id: &str) -> Option<bool> {
        let wire = self.session.circuit().connection(id)?;
        Some(self.session.signal_of(wire))
    }

    /// Id of the component whose body contains the point.
    #[wasm_bindgen]
    pub fn component_at(&self, x: f64, y: f64) -> Option<String> {
        layout::component_at(self.session.circuit(), Point::new(x, y)).map(str::to_string)
    }

    /// Terminal near the point as `owner:out` or `owner:in:<index>`.
    #[wasm_bindgen]
    pub fn terminal_at(&self, x: f64, y: f64) -> Option<String> {
        layout::terminal_at(self.session.circuit(), Point::new(x, y)).map(|t| match t {
            Terminal::GateInput { id, index, .. } => format!("{}:in:{}", id, index),
            other => format!("{}:out", other.owner()),
        })
    }

    /// Plain-text readout of the whole board.
    #[wasm_bindgen]
    pub fn report(&self) -> String {
        BoardReport::new(&self.session).to_string()
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn redraw(update: Update) -> bool {
    update.needs_redraw()
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default number of propagation rounds.
#[wasm_bindgen]
pub fn default_rounds() -> usize {
    crate::engine::PROPAGATION_ROUNDS
}
