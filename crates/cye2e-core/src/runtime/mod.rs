//! Runtime detection and dependency installation
//!
//! This module provides:
//! - Node.js and npm detection
//! - `npm install` in the generated project, with streamed output

pub mod check;
pub mod installer;

pub use check::{check_node, check_npm, check_runtimes, RuntimeInfo};
pub use installer::Installer;
