pub mod board;
pub mod color;
