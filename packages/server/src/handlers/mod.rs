pub mod qa;
pub mod upload;
pub mod video;
