mod reader;
mod types;

pub use reader::*;
pub use types::*;
