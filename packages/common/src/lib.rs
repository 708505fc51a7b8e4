pub mod media;
pub mod types;
