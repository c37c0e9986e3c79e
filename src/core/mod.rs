//! Configuration, errors and value normalization.
//!
//! Nothing in here touches XML; these are the pieces every decoder shares.

mod config;
mod error;
mod normalize;

pub use config::*;
pub use error::*;
pub use normalize::*;
