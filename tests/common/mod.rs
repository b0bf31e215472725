pub mod fixtures;
pub mod synthetic_image;
