use itertools::Itertools;
use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::input::parse;

/// Solve a table given in the textual format read by [`parse`](crate::input::parse).
///
/// Resolves to an array of strings, one per shortest winning sequence, e.g. `["E S"]`; empty if the table cannot be cleared.
/// Rejects with a message if the input is invalid.
#[wasm_bindgen(js_name = solveTable)]
pub fn solve_table(input: &str) -> Result<Array, JsValue> {
    let board = parse(input).map_err(|failure| JsValue::from_str(&failure.to_string()))?;
    let solution = board.solve()
        .map_err(|failure| JsValue::from_str(&format!("solver failure: {:?}", failure)))?;

    Ok(solution.sequences().iter()
        .map(|sequence| JsValue::from_str(&sequence.iter().join(" ")))
        .collect())
}
