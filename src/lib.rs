//! VioletVibes client runtime.
//!
//! Loads configuration, installs tracing, wires the concrete adapters into
//! [`vv_app::App`] and exposes the headless command-line driver.

pub mod bootstrap;
pub mod cli;
