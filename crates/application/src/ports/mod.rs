//! Application ports (interfaces to the outside world)

mod inference_port;

pub use inference_port::{InferencePort, InferenceResult};
