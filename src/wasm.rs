//! Entry point for calling the solver from JavaScript.

use itertools::Itertools;
use js_sys::Int32Array;
use wasm_bindgen::prelude::*;

use crate::locator::PuzzleLocator;
use crate::screenshot::Screenshot;

/// Locate and solve the puzzle in an encoded screenshot.
///
/// Returns the solution path as a flat `Int32Array` of pixel coordinates `[x0, y0, x1, y1, ...]`,
/// or `null` when no puzzle is found or the puzzle has no solution. Undecodable images throw.
#[wasm_bindgen(js_name = solveScreenshot)]
pub fn solve_screenshot(bytes: &[u8]) -> Result<JsValue, JsError> {
    let screenshot = Screenshot::decode(bytes)?.into_center_square();

    let Some(solution) = PuzzleLocator::default().locate(&screenshot).and_then(|mut puzzle| puzzle.solve()) else {
        return Ok(JsValue::NULL);
    };

    let coords = solution.pixel_path().flat_map(|point| [point.x, point.y]).collect_vec();
    Ok(Int32Array::from(coords.as_slice()).into())
}
