//! Document table loading and writing.

pub mod table;

pub use table::{write_frame, DocumentTable};
