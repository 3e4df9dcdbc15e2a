//! Manifest Builder
//!
//! Composes the template bodies and the dependency set into the final file list.
//! Every conditional entry is decided from the answers alone, so the same answers
//! always produce the same manifest.

use super::{FileManifest, ManifestError};
use crate::answers::{AnswerSet, BddReporter, TestDesign, VersionControl};
use crate::dependencies::DependencySet;
use crate::templates::{self, TemplateError, TemplateLibrary};
use serde::Serialize;

/// Directory holding the Cypress test tree
pub const CYPRESS_DIR: &str = "cypress";

/// Directories created even when no file lands in them
pub const SCAFFOLD_DIRS: &[&str] = &["cypress/e2e", "cypress/fixtures", "cypress/support"];

pub const PACKAGE_JSON: &str = "package.json";
pub const FIXTURE: &str = "cypress/fixtures/example.json";
pub const FEATURE: &str = "cypress/e2e/tests.feature";
pub const REPORT_GENERATOR: &str = "reportGen.js";
pub const TSCONFIG: &str = "tsconfig.json";
pub const GITIGNORE: &str = ".gitignore";

const JSON_REPORT: &str = "reports/json/results.json";
const HTML_REPORT: &str = "reports/html/results.html";

/// Main config file, by extension
pub fn config_path(extension: &str) -> String {
    format!("cypress.config.{}", extension)
}

pub fn support_e2e_path(extension: &str) -> String {
    format!("{}/support/e2e.{}", CYPRESS_DIR, extension)
}

pub fn support_commands_path(extension: &str) -> String {
    format!("{}/support/commands.{}", CYPRESS_DIR, extension)
}

pub fn example_spec_path(extension: &str) -> String {
    format!("{}/e2e/example.cy.{}", CYPRESS_DIR, extension)
}

pub fn steps_path(extension: &str) -> String {
    format!("{}/e2e/tests/steps.spec.cy.{}", CYPRESS_DIR, extension)
}

pub fn pipeline_path(provider: VersionControl) -> &'static str {
    match provider {
        VersionControl::Gitlab => ".gitlab-ci.yml",
        VersionControl::Github => ".github/workflows/runner.yml",
        VersionControl::Bitbucket => "bitbucket-pipelines.yml",
    }
}

/// Why the manifest could not be built
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// `package.json` document, fields in emitted order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson<'a> {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub main: &'static str,
    pub scripts: Scripts,
    pub dev_dependencies: &'a DependencySet,
    #[serde(
        rename = "cypress-cucumber-preprocessor",
        skip_serializing_if = "Option::is_none"
    )]
    pub cucumber_preprocessor: Option<CucumberPreprocessorConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scripts {
    pub test: &'static str,
}

/// Report output settings read by the cucumber preprocessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CucumberPreprocessorConfig {
    pub json: ReportOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<ReportOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutput {
    pub enabled: bool,
    pub output: &'static str,
}

impl<'a> PackageJson<'a> {
    pub fn new(answers: &AnswerSet, dependencies: &'a DependencySet) -> Self {
        Self {
            name: "cypress-project",
            version: "1.0.0",
            description: "A Cypress project configured automatically",
            main: "index.js",
            scripts: Scripts {
                test: "npx cypress run",
            },
            dev_dependencies: dependencies,
            cucumber_preprocessor: cucumber_preprocessor_config(answers),
        }
    }
}

/// Report settings, only when BDD and reporting are combined
///
/// Written for both BDD reporters even though the config body ignores the reporter
/// in BDD mode.
fn cucumber_preprocessor_config(answers: &AnswerSet) -> Option<CucumberPreprocessorConfig> {
    let TestDesign::Bdd {
        reporter: Some(reporter),
        ..
    } = answers.design
    else {
        return None;
    };

    let html = match reporter {
        BddReporter::Badeball => Some(ReportOutput {
            enabled: true,
            output: HTML_REPORT,
        }),
        BddReporter::MultipleCucumber => None,
    };

    Some(CucumberPreprocessorConfig {
        json: ReportOutput {
            enabled: true,
            output: JSON_REPORT,
        },
        html,
    })
}

/// Compose the complete manifest
pub fn build(
    library: &TemplateLibrary,
    answers: &AnswerSet,
    dependencies: &DependencySet,
) -> Result<FileManifest, BuildError> {
    let ext = answers.config_language.extension();
    let mut manifest = FileManifest::new();

    let package = serde_json::to_value(PackageJson::new(answers, dependencies)).map_err(
        |source| BuildError::Serialize {
            path: PACKAGE_JSON,
            source,
        },
    )?;
    manifest.push_structured(PACKAGE_JSON, package)?;

    manifest.push_text(config_path(ext), library.config_body(answers)?.content)?;

    manifest.push_text(support_e2e_path(ext), library.support_e2e_body(answers)?.content)?;
    manifest.push_text(
        support_commands_path(ext),
        library.support_commands_body(answers)?.content,
    )?;

    manifest.push_structured(FIXTURE, templates::fixture_body())?;

    if let Some(spec) = library.example_spec_body(answers)? {
        manifest.push_text(example_spec_path(ext), spec.content)?;
    }

    if let Some((steps, feature)) = library.bdd_bodies(answers)? {
        manifest.push_text(steps_path(ext), steps.content)?;
        manifest.push_text(FEATURE, feature.content)?;
    }

    if let Some(generator) = library.report_generator_body(answers)? {
        manifest.push_text(REPORT_GENERATOR, generator.content)?;
    }

    if let Some(tsconfig) = templates::type_config_body(answers) {
        manifest.push_structured(TSCONFIG, tsconfig)?;
    }

    if let (Some(provider), Some(pipeline)) = (answers.pipeline, library.pipeline_body(answers)?) {
        manifest.push_text(pipeline_path(provider), pipeline.content)?;
    }

    if let Some(ignore) = library.ignore_body(answers)? {
        manifest.push_text(GITIGNORE, ignore.content)?;
    }

    tracing::debug!(files = manifest.len(), "built manifest");
    Ok(manifest)
}
