//! Resolution Engine: answers in, file manifest out
//!
//! Runs validation, dependency resolution and manifest assembly in order. Nothing here
//! touches the filesystem; the caller writes the manifest once it has one.

use crate::answers::validate::{validate, ValidationError};
use crate::answers::{AnswerSet, RawAnswers};
use crate::dependencies::{self, DependencyError, DependencySet};
use crate::manifest::{self, BuildError, FileManifest, ManifestError};
use crate::templates::{TemplateError, TemplateLibrary};

/// Why a run produced no manifest
///
/// Only `Validation` is caused by user input; the rest indicate a broken catalog or
/// resolver.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid answers: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("dependency resolution failed: {0}")]
    Dependency(#[from] DependencyError),

    #[error("manifest assembly failed: {0}")]
    Manifest(#[from] ManifestError),

    #[error("failed to serialize {path}")]
    Serialize {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl From<BuildError> for EngineError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Template(e) => EngineError::Template(e),
            BuildError::Manifest(e) => EngineError::Manifest(e),
            BuildError::Serialize { path, source } => EngineError::Serialize { path, source },
        }
    }
}

impl EngineError {
    /// True when the user can fix the input and retry
    pub fn is_user_error(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}

/// Everything a run decided
#[derive(Debug, Clone)]
pub struct Resolution {
    pub answers: AnswerSet,
    pub dependencies: DependencySet,
    pub manifest: FileManifest,
}

/// Resolve with a fresh template library
pub fn resolve_project(raw: &RawAnswers) -> Result<Resolution, EngineError> {
    resolve_with(&TemplateLibrary::new()?, raw)
}

/// Resolve against an existing library
pub fn resolve_with(library: &TemplateLibrary, raw: &RawAnswers) -> Result<Resolution, EngineError> {
    let answers = validate(raw)?;
    tracing::debug!(
        language = %answers.config_language,
        bdd = answers.is_bdd(),
        reporter = ?answers.reporter(),
        pipeline = ?answers.pipeline,
        "validated answers"
    );

    let dependencies = dependencies::resolve(&answers)?;
    let manifest = manifest::build(library, &answers, &dependencies)?;

    tracing::debug!(
        packages = dependencies.len(),
        files = manifest.len(),
        "resolution complete"
    );

    Ok(Resolution {
        answers,
        dependencies,
        manifest,
    })
}
