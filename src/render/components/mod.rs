//! Reusable layout components

pub mod shot_table;

pub use shot_table::{format_measure, Column, TableLayout, TableRowData};
