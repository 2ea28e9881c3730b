//! Platform bindings
//!
//! Native builds call the library directly (see the CLI binary). On wasm32
//! the renderer is exported to JavaScript so a page can build the SVG from
//! grid JSON it already fetched.

#[cfg(target_arch = "wasm32")]
pub mod web;
