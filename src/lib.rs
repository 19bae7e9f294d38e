//! Core library for the sonic-sessions command line application.
//!
//! The library turns SONiC testbed inventories into terminal-client session
//! files. Loaders for the two YAML schemas live under
//! [`sonic::sessions::io`], the flat records inside [`sonic::sessions::model`],
//! the testbed/lab join in [`sonic::sessions::generate`], and the end-to-end
//! orchestration under [`sonic::sessions::export`].

pub mod sonic;

pub use sonic::sessions::{Result, ToolError, error, export, generate, io, logging, model};
