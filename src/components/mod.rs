//! The components module contains all shared components for the site.

mod app;
mod hero;
mod navbar;
mod sections;

pub use app::*;
pub use hero::*;
pub use navbar::*;
pub use sections::*;
