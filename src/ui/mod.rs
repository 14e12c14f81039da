//! egui widgets. Each function draws from already-computed data and reports
//! user input back through [`crate::state::Session`].

pub mod charts;
pub mod panels;
pub mod table;
