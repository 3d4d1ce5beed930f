//! dsdb - Design System Database browser
//!
//! dsdb loads a DSDB JSON export (components, token sets, tokens, values and
//! context-dependent reference trees) and resolves each token to the value
//! that applies under a chosen context such as `theme=dark, density=compact`.
//! Results are browsed from the command line or exported as JSON.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Resolution engine (store, resolution, relevance, hierarchy, export)
//! - `findings`: Finding type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod findings;
