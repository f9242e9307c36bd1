// src/render/mod.rs

//! Terminal dashboard.
//!
//! - [`cache`]: latest row per host.
//! - [`signal`]: coalescing "redraw needed" channel.
//! - [`table`]: column alignment.
//! - [`renderer`]: update actors + render loop.

pub mod cache;
pub mod renderer;
pub mod signal;
pub mod table;

pub use cache::RowCache;
pub use renderer::{CLEAR_SCREEN, RenderSettings, paint, render, render_loop, update};
pub use signal::{RepaintSignal, RepaintWaiter, repaint_channel};
pub use table::format_table;
