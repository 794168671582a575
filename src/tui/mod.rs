//! TUI module for the interactive game.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering and mouse hit-testing
//! - `theme`: Light and dark palettes
//! - `run`: Effects (terminal, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
