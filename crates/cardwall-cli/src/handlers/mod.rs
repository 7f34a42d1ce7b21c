pub mod board;
pub mod print;
