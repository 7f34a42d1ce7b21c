pub mod board;
pub mod text;

pub use board::*;
pub use text::*;
