//! Storage helpers for household-budget
//!
//! JSON files on disk, written atomically.

pub mod file_io;

pub use file_io::{read_json, write_json_atomic};
