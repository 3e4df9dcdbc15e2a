//! cye2e Core - Configuration resolution for Cypress end-to-end project scaffolding
//!
//! Turns a set of answers (configuration language, base URL, BDD, reporter, pipeline,
//! ignore file, install) into the complete list of files a Cypress project needs,
//! plus the npm packages it depends on.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Resolution Engine** - Pure, deterministic functions: answer validation,
//!   dependency resolution, template selection and manifest assembly
//! - **Layer 2: Collaborators** - Answers file loading, writing the manifest to disk or
//!   a zip archive, runtime detection and `npm install`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```no_run
//! use cye2e_core::answers::{Bundler, RawAnswersBuilder, Reporter};
//! use cye2e_core::{resolve_project, writer};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let raw = RawAnswersBuilder::new()
//!     .test_design(true)
//!     .bundler(Bundler::Esbuild)
//!     .reporter(Reporter::Badeball)
//!     .build();
//!
//! let resolution = resolve_project(&raw)?;
//! writer::write_manifest(&resolution.manifest, std::path::Path::new("my-tests")).await?;
//! # Ok(())
//! # }
//! ```

pub mod answers;
pub mod config;
pub mod dependencies;
pub mod engine;
pub mod manifest;
pub mod product;
pub mod runtime;
pub mod templates;
pub mod writer;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerSet, RawAnswers, RawAnswersBuilder, ValidationError};
pub use dependencies::{DependencySet, VersionConstraint};
pub use engine::{resolve_project, EngineError, Resolution};
pub use manifest::{FileContent, FileManifest, ManifestEntry};
pub use runtime::{check_runtimes, Installer, RuntimeInfo};
pub use templates::TemplateLibrary;

#[cfg(feature = "tui")]
pub use tui::run;
