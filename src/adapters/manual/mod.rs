pub mod dot_code;
pub mod tread_gauge;
