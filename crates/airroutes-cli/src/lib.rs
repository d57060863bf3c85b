//! airroutes CLI library.
//!
//! Terminal styling and output formatting shared by the `airroutes` binary.

pub mod output;
pub mod terminal;
