pub mod errors;

pub use errors::{SResult, SamplerError};
