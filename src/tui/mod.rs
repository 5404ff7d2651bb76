//! Terminal User Interface module
//!
//! A ratatui front-end for the wizard: a stepper with per-step forms, pool
//! and inspection pages, a block explorer, a debug panel, and the outcome
//! banner. All state changes go through the wizard's command queue.

pub mod app;
pub mod event;
pub mod form;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
