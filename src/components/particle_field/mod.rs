//! Animated particle field behind the page content.
//!
//! A fixed-size population of particles moves under one of several
//! interaction modes:
//! - pointer follow
//! - autonomous orbits around the field center
//! - flocking with short links drawn between neighbours, scattered by a
//!   pointer press
//! - a time-varying flow field, optionally clustered around seeds
//!
//! The simulation in [`particles`] is pure and host-testable; the canvas
//! component owns the browser side.
//!
//! # Example
//!
//! ```ignore
//! use folio::components::particle_field::{FieldConfig, ParticleFieldCanvas, ParticleStyle};
//!
//! view! { <ParticleFieldCanvas config=FieldConfig::flocking() style=ParticleStyle::ink() /> }
//! ```

mod component;
pub mod config;
pub mod flow;
pub mod particles;
mod render;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::{Boundary, FieldConfig, InteractionMode};
pub use particles::{Bounds, FrameInput, ParticleField, PointerState};
pub use theme::{Color, ParticleStyle};
