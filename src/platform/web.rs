//! JavaScript exports

use wasm_bindgen::prelude::*;

use crate::{CalendarGrid, PaletteChoice, RunOptions, render_svg};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("calendar-breakout (wasm) ready");
}

/// Render grid JSON (`{ "weeks": [...] }`) to an SVG string.
///
/// `palette` accepts `derived`, `light`, `dark` or five comma-separated colors.
#[wasm_bindgen]
pub fn render_svg_json(grid_json: &str, palette: &str, ghost_mode: bool) -> Result<String, JsValue> {
    let grid: CalendarGrid = serde_json::from_str(grid_json).map_err(js_err)?;
    let options = RunOptions {
        ghost_mode,
        palette: PaletteChoice::from_str(palette).map_err(js_err)?,
        ..Default::default()
    };
    render_svg(&grid, &options).map_err(js_err)
}
