//! Namespace-aware token cursor built on `quick-xml`.

mod cursor;

pub use cursor::*;
