//! poolwizard - setup wizard for a Uniswap-V2-style pair
//!
//! This library drives the "initialize -> approve -> mint" setup of a pair
//! contract on a local dev chain. Progress is cached on disk and reconciled
//! with the contract, which stays authoritative.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and connection options
//! - `error`: Custom error types
//! - `chain`: Typed contract access over JSON-RPC
//! - `models`: Wizard progress, outcomes, readings and form inputs
//! - `storage`: Key/value persistence of wizard progress
//! - `audit`: Activity log of settled operations
//! - `services`: The wizard controller, its command queue and the block explorer
//! - `cli` / `display` / `tui`: Front-ends
//!
//! # Example
//!
//! ```rust,ignore
//! use poolwizard::config::{ConnectionOptions, Settings, WizardPaths};
//! use poolwizard::cli::Session;
//!
//! let paths = WizardPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut session = Session::connect(&paths, &settings, ConnectionOptions::default())?;
//! session.start().await?;
//! ```

pub mod audit;
pub mod chain;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::WizardError;
