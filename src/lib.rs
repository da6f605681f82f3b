//! WebAssembly match-three grid engine.
//!
//! The engine owns a square field of colored balls. A caller swaps two
//! adjacent balls with `try_move`, then drives the clear/refill cascade with
//! `scan`, observing score and field-change callbacks, and asks
//! `can_make_next_move` whether the game has stalled.
//!
//! The core is pure Rust; `wasm_exports` (wasm32 only) wraps it in a class
//! callable from JavaScript, with field snapshots passed as flat row-major
//! `Uint8Array`s: `cells[row * size + col]`.

pub mod engine;
pub mod lines;
pub mod oracle;
pub mod rng;
pub mod types;

pub use engine::GridEngine;
pub use types::{Coord, Direction, EngineError, Field, LineKind, MoveOutcome};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use crate::engine::GridEngine;
    use crate::types::{Coord, DEFAULT_COLOR_COUNT};
    use wasm_bindgen::prelude::*;
    use web_sys::console;

    fn log(msg: &str) {
        console::log_1(&JsValue::from_str(msg));
    }

    fn to_js_err(e: crate::types::EngineError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// The grid engine as seen from JavaScript.
    #[wasm_bindgen]
    pub struct BallsEngine {
        inner: GridEngine,
    }

    #[wasm_bindgen]
    impl BallsEngine {
        #[wasm_bindgen(constructor)]
        pub fn new() -> BallsEngine {
            BallsEngine {
                inner: GridEngine::new(),
            }
        }

        /// Generate a startable `size x size` field. Returns how many random
        /// layouts were tried. Throws on an invalid size or color count.
        #[wasm_bindgen]
        pub fn generate(&mut self, size: usize, colors: Option<u8>) -> Result<u32, JsValue> {
            let colors = colors.unwrap_or(DEFAULT_COLOR_COUNT);
            let attempts = self.inner.generate(size, colors).map_err(to_js_err)?;
            if attempts > 1 {
                log(&format!(
                    "field had a run or no possible move, regenerated {} times",
                    attempts - 1
                ));
            }
            Ok(attempts)
        }

        #[wasm_bindgen]
        pub fn size(&self) -> Result<usize, JsValue> {
            Ok(self.inner.field().map_err(to_js_err)?.size())
        }

        /// Flat row-major snapshot of the field (0 = empty cell).
        #[wasm_bindgen(js_name = "getField")]
        pub fn get_field(&self) -> Result<js_sys::Uint8Array, JsValue> {
            let field = self.inner.field().map_err(to_js_err)?;
            let arr = js_sys::Uint8Array::new_with_length(field.cells().len() as u32);
            arr.copy_from(field.cells());
            Ok(arr)
        }

        /// Test/debug injection, bypasses validity checks.
        #[wasm_bindgen(js_name = "setField")]
        pub fn set_field(&mut self, size: usize, cells: &[u8]) -> Result<(), JsValue> {
            if cells.len() != size * size {
                return Err(JsValue::from_str("cells length must be size * size"));
            }
            let rows: Vec<Vec<u8>> = cells.chunks(size).map(|chunk| chunk.to_vec()).collect();
            self.inner.set_field(&rows);
            Ok(())
        }

        /// Attempt a swap; returns one of the outcome tags
        /// `"illegal"`, `"illegal-same-color"`, `"unchanged"`, `"changed"`.
        #[wasm_bindgen(js_name = "tryMove")]
        pub fn try_move(
            &mut self,
            from_row: usize,
            from_col: usize,
            to_row: usize,
            to_col: usize,
        ) -> Result<JsValue, JsValue> {
            let outcome = self
                .inner
                .try_move(Coord::new(from_row, from_col), Coord::new(to_row, to_col))
                .map_err(to_js_err)?;
            serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
        }

        /// Drive the clear/refill cascade. `on_score(points)` fires before
        /// each field mutation; a truthy return (or a throw) stops the
        /// cascade. `on_field_changed()` fires after each line write.
        #[wasm_bindgen]
        pub fn scan(
            &mut self,
            on_score: &js_sys::Function,
            on_field_changed: &js_sys::Function,
        ) -> Result<(), JsValue> {
            self.inner
                .scan(
                    |points| {
                        on_score
                            .call1(&JsValue::NULL, &JsValue::from_f64(points as f64))
                            .map(|v| v.is_truthy())
                            .unwrap_or(true)
                    },
                    || {
                        let _ = on_field_changed.call0(&JsValue::NULL);
                    },
                )
                .map_err(to_js_err)
        }

        /// Whether any legal swap would create a run; the UI uses this after
        /// a cascade settles to decide game over.
        #[wasm_bindgen(js_name = "canMakeNextMove")]
        pub fn can_make_next_move(&self) -> Result<bool, JsValue> {
            self.inner.can_make_next_move().map_err(to_js_err)
        }

        /// Number of distinct ball colors in play.
        #[wasm_bindgen(js_name = "getColorCount")]
        pub fn get_color_count(&self) -> u8 {
            self.inner.color_count()
        }
    }

    impl Default for BallsEngine {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "WASM engine ready".to_string()
    }
}
