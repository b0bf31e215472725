pub mod age;
pub mod analysis;
pub mod defect;
pub mod detection;
pub mod errors;
pub mod model;
pub mod postprocess;
pub mod recommendation;
pub mod scoring;
pub mod tread;
