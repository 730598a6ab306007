//! Display formatting for terminal output

pub mod report;

pub use report::{
    format_balance, format_bar, format_percentage, left_align, right_align,
    separator, truncate,
};
