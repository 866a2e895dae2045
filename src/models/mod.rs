pub mod exercise;
pub mod user;

pub use exercise::*;
pub use user::*;
