pub mod fixtures;
pub mod standings;
