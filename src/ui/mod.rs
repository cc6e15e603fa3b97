mod degree;
mod help;
mod loglog;
mod network;
mod pane;
mod screen;
mod stats;

pub use degree::*;
pub use help::*;
pub use loglog::*;
pub use network::*;
pub use pane::*;
pub use screen::*;
pub use stats::*;
