mod builder;
pub mod layout;
pub mod metrics;
mod model;

pub use builder::*;
pub use layout::{spring_layout, LayoutOptions};
pub use model::*;
