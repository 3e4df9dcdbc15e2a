//! Template Library
//!
//! This module provides:
//! - The catalog of file bodies, keyed by the answer dimensions that select them
//! - Pure selection functions (which body for which answers)
//! - Rendering through a strict `minijinja` environment
//!
//! Bodies are rendered without auto-escaping: the base URL is injected verbatim.

pub mod catalog;

use crate::answers::{AnswerSet, ConfigLanguage, SpecReporter, TestDesign, VersionControl};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use serde_json::{json, Value};

pub use catalog::{ConfigTemplate, TemplateId};

/// Docker image used by the GitLab and Bitbucket pipelines
pub const BROWSER_IMAGE: &str =
    "cypress/browsers:node-20.9.0-chrome-118.0.5993.88-1-ff-118.0.2-edge-118.0.2088.46-1";

/// A template body could not be rendered
#[derive(Debug, thiserror::Error)]
#[error("failed to render template '{name}': {source}")]
pub struct TemplateError {
    pub name: &'static str,
    #[source]
    pub source: minijinja::Error,
}

/// A rendered text body and the catalog entry it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateBody {
    pub id: TemplateId,
    pub content: String,
}

/// Values available to every template
#[derive(Debug, Serialize)]
struct RenderContext<'a> {
    base_url: &'a str,
    /// Module imported by the support root for reporter registration
    registration: Option<&'static str>,
    browser_image: &'static str,
}

/// Select the main config body, first match wins
///
/// BDD mode takes precedence over reporter configuration even when a reporter was
/// chosen: the reporter dimension then only affects `package.json`.
pub fn config_template(answers: &AnswerSet) -> TemplateId {
    let family = match answers.design {
        TestDesign::Bdd { bundler, .. } => ConfigTemplate::Bdd(bundler),
        TestDesign::Spec {
            reporter: Some(reporter),
        } => ConfigTemplate::Reporter(reporter),
        TestDesign::Spec { reporter: None } => ConfigTemplate::Baseline,
    };
    TemplateId::Config(family, answers.config_language)
}

/// Reporter registration import for the support root, only for plain specs
pub fn support_registration(answers: &AnswerSet) -> Option<&'static str> {
    match answers.design {
        TestDesign::Spec {
            reporter: Some(SpecReporter::Mochawesome),
        } => Some("cypress-mochawesome-reporter/register"),
        TestDesign::Spec {
            reporter: Some(SpecReporter::Allure),
        } => Some("allure-cypress/commands"),
        _ => None,
    }
}

pub fn pipeline_template(provider: VersionControl) -> TemplateId {
    TemplateId::Pipeline(provider)
}

/// The compiled catalog, ready to render
pub struct TemplateLibrary {
    env: Environment<'static>,
}

impl TemplateLibrary {
    /// Compile every catalog source, failing on the first one that does not parse
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for &(name, source) in catalog::SOURCES {
            env.add_template(name, source)
                .map_err(|source| TemplateError { name, source })?;
        }

        tracing::trace!(templates = catalog::SOURCES.len(), "compiled template catalog");
        Ok(Self { env })
    }

    /// Render any catalog entry for the given answers
    pub fn render(&self, id: TemplateId, answers: &AnswerSet) -> Result<TemplateBody, TemplateError> {
        let name = id.name();
        let ctx = RenderContext {
            base_url: &answers.base_url,
            registration: support_registration(answers),
            browser_image: BROWSER_IMAGE,
        };

        let content = self
            .env
            .get_template(name)
            .and_then(|template| template.render(&ctx))
            .map_err(|source| TemplateError { name, source })?;

        tracing::trace!(template = name, bytes = content.len(), "rendered template");
        Ok(TemplateBody { id, content })
    }

    pub fn config_body(&self, answers: &AnswerSet) -> Result<TemplateBody, TemplateError> {
        self.render(config_template(answers), answers)
    }

    pub fn support_e2e_body(&self, answers: &AnswerSet) -> Result<TemplateBody, TemplateError> {
        self.render(TemplateId::SupportE2e, answers)
    }

    pub fn support_commands_body(
        &self,
        answers: &AnswerSet,
    ) -> Result<TemplateBody, TemplateError> {
        self.render(TemplateId::SupportCommands, answers)
    }

    /// Plain example spec, absent in BDD mode
    pub fn example_spec_body(
        &self,
        answers: &AnswerSet,
    ) -> Result<Option<TemplateBody>, TemplateError> {
        if answers.is_bdd() {
            return Ok(None);
        }
        self.render(TemplateId::ExampleSpec, answers).map(Some)
    }

    /// Step definitions and feature file, present only in BDD mode
    pub fn bdd_bodies(
        &self,
        answers: &AnswerSet,
    ) -> Result<Option<(TemplateBody, TemplateBody)>, TemplateError> {
        if !answers.is_bdd() {
            return Ok(None);
        }
        let steps = self.render(TemplateId::StepDefinitions, answers)?;
        let feature = self.render(TemplateId::Feature, answers)?;
        Ok(Some((steps, feature)))
    }

    /// `multiple-cucumber-html-reporter` generator script
    pub fn report_generator_body(
        &self,
        answers: &AnswerSet,
    ) -> Result<Option<TemplateBody>, TemplateError> {
        if answers.reporter() != Some(crate::answers::Reporter::MultipleCucumber) {
            return Ok(None);
        }
        self.render(TemplateId::ReportGenerator, answers).map(Some)
    }

    pub fn pipeline_body(
        &self,
        answers: &AnswerSet,
    ) -> Result<Option<TemplateBody>, TemplateError> {
        match answers.pipeline {
            Some(provider) => self.render(pipeline_template(provider), answers).map(Some),
            None => Ok(None),
        }
    }

    pub fn ignore_body(&self, answers: &AnswerSet) -> Result<Option<TemplateBody>, TemplateError> {
        if !answers.ignore_file {
            return Ok(None);
        }
        self.render(TemplateId::GitIgnore, answers).map(Some)
    }
}

/// Sample fixture data
pub fn fixture_body() -> Value {
    json!({ "exampleKey": "exampleValue" })
}

/// `tsconfig.json`, TypeScript only
pub fn type_config_body(answers: &AnswerSet) -> Option<Value> {
    if answers.config_language != ConfigLanguage::TypeScript {
        return None;
    }
    Some(json!({
        "compilerOptions": {
            "esModuleInterop": true,
            "module": "nodenext",
            "target": "es5",
            "lib": ["es5", "dom"],
            "types": ["cypress", "node"]
        },
        "include": ["**/*.ts"]
    }))
}
