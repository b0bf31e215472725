pub mod detector;
pub mod dto;
pub mod heuristic;
pub mod ports;
pub mod services;
