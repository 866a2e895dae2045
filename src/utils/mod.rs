// Utility functions
pub mod date;
pub mod error;

pub use error::*;
