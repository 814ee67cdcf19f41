//! BOM structure domain: rows, tree reconstruction and editing policies
//!
//! Nothing in here performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
