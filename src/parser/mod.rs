pub mod payload;

pub use crate::error::PayloadError;
pub use payload::{load_envelope, Envelope};
