//! Human-readable rendering helpers.

pub mod colors;
pub mod table;

pub use colors::{check_mark, colorize_outcome, cross_mark};
pub use table::{list_table, render_list};
