pub mod export;
pub mod levels;
