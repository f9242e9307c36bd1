// src/engine/mod.rs

//! Actor lifecycle for hostwatch.
//!
//! - [`group`] runs a fixed set of actors and unwinds all of them as soon as
//!   one stops, reporting the first outcome.
//! - [`interrupt`] is the actor that maps OS termination signals onto that
//!   shutdown path.

pub mod group;
pub mod interrupt;

pub use group::Group;
pub use interrupt::{interrupt, interrupt_on};
