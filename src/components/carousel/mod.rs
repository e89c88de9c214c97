//! Project media carousel.
//!
//! [`CarouselState`] decides which slide is current, when navigation is
//! locked, and what each slide's video should do. The component feeds it
//! wheel, key and click input plus `<video>` events, and executes the
//! [`MediaCommand`]s it returns.

mod component;
pub mod config;
pub mod state;
pub mod types;

pub use component::ProjectCarousel;
pub use config::{AutoplayPolicy, BoundaryPolicy, CarouselConfig};
pub use state::{CarouselState, MediaCommand, MediaDisplay, MediaFlags, PlaybackRejected};
pub use types::{MediaKind, ProjectEntry, default_projects};
