// Classifier loading — the seam where the neural method can fail.

pub mod download;
pub mod onnx;
pub mod traits;
