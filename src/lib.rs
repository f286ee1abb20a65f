//! recipebook: recipe catalog browser with a serving-size calculator.
//!
//! Loads a static recipe catalog, keeps track of the selected recipe and
//! the requested number of people, and renders scaled ingredient lists as
//! terminal text or into an HTML page skeleton.

pub mod cli;
pub mod core;
pub mod render;
pub mod session;
