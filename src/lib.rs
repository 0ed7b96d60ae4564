//! Pokedex TUI over the PokeAPI.
//!
//! This library exposes the application's modules for testing.

pub mod action;
pub mod api;
pub mod detail;
pub mod effect;
pub mod evolution;
pub mod reducer;
pub mod state;
pub mod ui;
