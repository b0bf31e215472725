pub mod http;
pub mod manual;
pub mod onnx;
