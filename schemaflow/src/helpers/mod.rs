//! Helper modules for logging composition and validator memoization.

pub mod logging;
pub mod memo;

pub use logging::{init_logging, logged};
pub use memo::memoized;
