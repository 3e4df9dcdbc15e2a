//! The fixed set of template bodies compiled into the binary

use crate::answers::{Bundler, ConfigLanguage, SpecReporter, VersionControl};

/// Which main config body family was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigTemplate {
    /// Plain `defineConfig` with only the base URL
    Baseline,
    /// Reporter plugin wiring for plain spec files
    Reporter(SpecReporter),
    /// Cucumber preprocessor wiring for the chosen bundler
    Bdd(Bundler),
}

/// Identifies one body in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Config(ConfigTemplate, ConfigLanguage),
    SupportE2e,
    SupportCommands,
    ExampleSpec,
    StepDefinitions,
    Feature,
    ReportGenerator,
    Pipeline(VersionControl),
    GitIgnore,
}

impl TemplateId {
    /// Registration name in the template environment
    pub fn name(self) -> &'static str {
        use ConfigLanguage::{JavaScript as Js, TypeScript as Ts};

        match self {
            TemplateId::Config(ConfigTemplate::Baseline, Js) => "config/baseline.js",
            TemplateId::Config(ConfigTemplate::Baseline, Ts) => "config/baseline.ts",
            TemplateId::Config(ConfigTemplate::Reporter(SpecReporter::Mochawesome), Js) => {
                "config/mochawesome.js"
            }
            TemplateId::Config(ConfigTemplate::Reporter(SpecReporter::Mochawesome), Ts) => {
                "config/mochawesome.ts"
            }
            TemplateId::Config(ConfigTemplate::Reporter(SpecReporter::Allure), Js) => {
                "config/allure.js"
            }
            TemplateId::Config(ConfigTemplate::Reporter(SpecReporter::Allure), Ts) => {
                "config/allure.ts"
            }
            TemplateId::Config(ConfigTemplate::Bdd(Bundler::Browserify), Js) => {
                "config/bdd-browserify.js"
            }
            TemplateId::Config(ConfigTemplate::Bdd(Bundler::Browserify), Ts) => {
                "config/bdd-browserify.ts"
            }
            TemplateId::Config(ConfigTemplate::Bdd(Bundler::Esbuild), Js) => "config/bdd-esbuild.js",
            TemplateId::Config(ConfigTemplate::Bdd(Bundler::Esbuild), Ts) => "config/bdd-esbuild.ts",
            TemplateId::Config(ConfigTemplate::Bdd(Bundler::Webpack), Js) => "config/bdd-webpack.js",
            TemplateId::Config(ConfigTemplate::Bdd(Bundler::Webpack), Ts) => "config/bdd-webpack.ts",
            TemplateId::SupportE2e => "support/e2e",
            TemplateId::SupportCommands => "support/commands",
            TemplateId::ExampleSpec => "e2e/example.cy",
            TemplateId::StepDefinitions => "e2e/steps.spec.cy",
            TemplateId::Feature => "e2e/tests.feature",
            TemplateId::ReportGenerator => "report/reportGen.js",
            TemplateId::Pipeline(VersionControl::Gitlab) => "pipeline/gitlab.yml",
            TemplateId::Pipeline(VersionControl::Github) => "pipeline/github.yml",
            TemplateId::Pipeline(VersionControl::Bitbucket) => "pipeline/bitbucket.yml",
            TemplateId::GitIgnore => "ignore/gitignore",
        }
    }
}

/// Template name and source for every body
pub const SOURCES: &[(&str, &str)] = &[
    ("config/baseline.js", include_str!("../../templates/config/baseline.js.j2")),
    ("config/baseline.ts", include_str!("../../templates/config/baseline.ts.j2")),
    ("config/mochawesome.js", include_str!("../../templates/config/mochawesome.js.j2")),
    ("config/mochawesome.ts", include_str!("../../templates/config/mochawesome.ts.j2")),
    ("config/allure.js", include_str!("../../templates/config/allure.js.j2")),
    ("config/allure.ts", include_str!("../../templates/config/allure.ts.j2")),
    ("config/bdd-browserify.js", include_str!("../../templates/config/bdd-browserify.js.j2")),
    ("config/bdd-browserify.ts", include_str!("../../templates/config/bdd-browserify.ts.j2")),
    ("config/bdd-esbuild.js", include_str!("../../templates/config/bdd-esbuild.js.j2")),
    ("config/bdd-esbuild.ts", include_str!("../../templates/config/bdd-esbuild.ts.j2")),
    ("config/bdd-webpack.js", include_str!("../../templates/config/bdd-webpack.js.j2")),
    ("config/bdd-webpack.ts", include_str!("../../templates/config/bdd-webpack.ts.j2")),
    ("support/e2e", include_str!("../../templates/support/e2e.j2")),
    ("support/commands", include_str!("../../templates/support/commands.j2")),
    ("e2e/example.cy", include_str!("../../templates/e2e/example.cy.j2")),
    ("e2e/steps.spec.cy", include_str!("../../templates/e2e/steps.spec.cy.j2")),
    ("e2e/tests.feature", include_str!("../../templates/e2e/tests.feature.j2")),
    ("report/reportGen.js", include_str!("../../templates/report/reportGen.js.j2")),
    ("pipeline/gitlab.yml", include_str!("../../templates/pipeline/gitlab.yml.j2")),
    ("pipeline/github.yml", include_str!("../../templates/pipeline/github.yml.j2")),
    ("pipeline/bitbucket.yml", include_str!("../../templates/pipeline/bitbucket.yml.j2")),
    ("ignore/gitignore", include_str!("../../templates/ignore/gitignore.j2")),
];

/// Every template id, for exhaustive checks
pub fn all_ids() -> Vec<TemplateId> {
    let mut ids = Vec::new();
    for &language in [ConfigLanguage::JavaScript, ConfigLanguage::TypeScript].iter() {
        ids.push(TemplateId::Config(ConfigTemplate::Baseline, language));
        for reporter in [SpecReporter::Mochawesome, SpecReporter::Allure] {
            ids.push(TemplateId::Config(ConfigTemplate::Reporter(reporter), language));
        }
        for bundler in [Bundler::Browserify, Bundler::Esbuild, Bundler::Webpack] {
            ids.push(TemplateId::Config(ConfigTemplate::Bdd(bundler), language));
        }
    }
    ids.extend([
        TemplateId::SupportE2e,
        TemplateId::SupportCommands,
        TemplateId::ExampleSpec,
        TemplateId::StepDefinitions,
        TemplateId::Feature,
        TemplateId::ReportGenerator,
        TemplateId::Pipeline(VersionControl::Gitlab),
        TemplateId::Pipeline(VersionControl::Github),
        TemplateId::Pipeline(VersionControl::Bitbucket),
        TemplateId::GitIgnore,
    ]);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_id_has_a_source() {
        let names: HashSet<&str> = SOURCES.iter().map(|(name, _)| *name).collect();
        for id in all_ids() {
            assert!(names.contains(id.name()), "missing source for {:?}", id);
        }
    }

    #[test]
    fn test_every_source_is_reachable() {
        let used: HashSet<&str> = all_ids().into_iter().map(TemplateId::name).collect();
        assert_eq!(used.len(), SOURCES.len());
    }
}
