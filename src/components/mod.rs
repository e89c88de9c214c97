//! UI components for the portfolio site.

pub mod carousel;
pub mod dom;
pub mod particle_field;
pub mod sections;
pub mod site_theme;
