//! Single-step assembly of [`RawAnswers`]
//!
//! Answers can come from command line flags, an answers file and interactive prompts.
//! Each source fills a [`RawAnswersBuilder`]; layers are combined with
//! [`RawAnswersBuilder::or`] and the finished record is produced once with
//! [`RawAnswersBuilder::build`].

use super::{Bundler, ConfigLanguage, RawAnswers, Reporter, VersionControl, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

/// Partially answered questions
///
/// Deserializes from the answers file format: the camelCase field names of
/// [`RawAnswers`], all optional, unknown keys rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawAnswersBuilder {
    #[serde(default)]
    pub config_language: Option<ConfigLanguage>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub test_design: Option<bool>,
    #[serde(default)]
    pub bundler: Option<Bundler>,
    #[serde(default)]
    pub report_choice: Option<bool>,
    #[serde(default)]
    pub reporter: Option<Reporter>,
    #[serde(default)]
    pub pipeline_config: Option<bool>,
    #[serde(default)]
    pub version_control: Option<VersionControl>,
    #[serde(default)]
    pub ignore_file: Option<bool>,
    #[serde(default)]
    pub install_dependencies: Option<bool>,
}

impl RawAnswersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config_language(mut self, language: ConfigLanguage) -> Self {
        self.config_language = Some(language);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn test_design(mut self, bdd: bool) -> Self {
        self.test_design = Some(bdd);
        self
    }

    pub fn bundler(mut self, bundler: Bundler) -> Self {
        self.bundler = Some(bundler);
        self
    }

    pub fn report_choice(mut self, wanted: bool) -> Self {
        self.report_choice = Some(wanted);
        self
    }

    /// Choosing a reporter also answers "do you want a reporter" with yes
    pub fn reporter(mut self, reporter: Reporter) -> Self {
        self.reporter = Some(reporter);
        self.report_choice.get_or_insert(true);
        self
    }

    pub fn pipeline_config(mut self, wanted: bool) -> Self {
        self.pipeline_config = Some(wanted);
        self
    }

    /// Choosing a provider also answers "do you want a pipeline" with yes
    pub fn version_control(mut self, provider: VersionControl) -> Self {
        self.version_control = Some(provider);
        self.pipeline_config.get_or_insert(true);
        self
    }

    pub fn ignore_file(mut self, wanted: bool) -> Self {
        self.ignore_file = Some(wanted);
        self
    }

    pub fn install_dependencies(mut self, wanted: bool) -> Self {
        self.install_dependencies = Some(wanted);
        self
    }

    /// Answer the `reportChoice` and `pipelineConfig` gates with yes when only their
    /// dependent choice was given
    pub fn with_implied_gates(mut self) -> Self {
        if self.reporter.is_some() {
            self.report_choice.get_or_insert(true);
        }
        if self.version_control.is_some() {
            self.pipeline_config.get_or_insert(true);
        }
        self
    }

    /// Fill every unanswered question from `fallback` (self takes precedence)
    pub fn or(self, fallback: RawAnswersBuilder) -> Self {
        Self {
            config_language: self.config_language.or(fallback.config_language),
            base_url: self.base_url.or(fallback.base_url),
            test_design: self.test_design.or(fallback.test_design),
            bundler: self.bundler.or(fallback.bundler),
            report_choice: self.report_choice.or(fallback.report_choice),
            reporter: self.reporter.or(fallback.reporter),
            pipeline_config: self.pipeline_config.or(fallback.pipeline_config),
            version_control: self.version_control.or(fallback.version_control),
            ignore_file: self.ignore_file.or(fallback.ignore_file),
            install_dependencies: self.install_dependencies.or(fallback.install_dependencies),
        }
    }

    /// Produce the raw answers, using the prompt defaults for anything unanswered
    ///
    /// Conditional fields (`bundler`, `reporter`, `versionControl`) are left unset when
    /// not answered; the validator decides whether that is acceptable.
    pub fn build(self) -> RawAnswers {
        RawAnswers {
            config_language: self.config_language.unwrap_or_default(),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            test_design: self.test_design.unwrap_or(false),
            bundler: self.bundler,
            report_choice: self.report_choice.unwrap_or(false),
            reporter: self.reporter,
            pipeline_config: self.pipeline_config.unwrap_or(false),
            version_control: self.version_control,
            ignore_file: self.ignore_file.unwrap_or(false),
            install_dependencies: self.install_dependencies.unwrap_or(false),
        }
    }

    /// Like [`build`](Self::build), but also picks the prompt default for every
    /// conditional field whose gate is on (non-interactive mode)
    pub fn build_with_defaults(self) -> RawAnswers {
        let mut raw = self.build();
        if raw.test_design && raw.bundler.is_none() {
            raw.bundler = Some(Bundler::default());
        }
        if raw.report_choice && raw.reporter.is_none() {
            raw.reporter = Some(Reporter::default_for(raw.test_design));
        }
        if raw.pipeline_config && raw.version_control.is_none() {
            raw.version_control = Some(VersionControl::default());
        }
        raw
    }
}

impl From<RawAnswers> for RawAnswersBuilder {
    fn from(raw: RawAnswers) -> Self {
        Self {
            config_language: Some(raw.config_language),
            base_url: Some(raw.base_url),
            test_design: Some(raw.test_design),
            bundler: raw.bundler,
            report_choice: Some(raw.report_choice),
            reporter: raw.reporter,
            pipeline_config: Some(raw.pipeline_config),
            version_control: raw.version_control,
            ignore_file: Some(raw.ignore_file),
            install_dependencies: Some(raw.install_dependencies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_uses_prompt_defaults() {
        let raw = RawAnswersBuilder::new().build();
        assert_eq!(raw, RawAnswers::default());
        assert_eq!(raw.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_reporter_implies_report_choice() {
        let raw = RawAnswersBuilder::new().reporter(Reporter::Allure).build();
        assert!(raw.report_choice);
        assert_eq!(raw.reporter, Some(Reporter::Allure));
    }

    #[test]
    fn test_explicit_report_choice_is_not_overridden() {
        let raw = RawAnswersBuilder::new()
            .report_choice(false)
            .reporter(Reporter::Allure)
            .build();
        assert!(!raw.report_choice);
    }

    #[test]
    fn test_version_control_implies_pipeline_config() {
        let raw = RawAnswersBuilder::new()
            .version_control(VersionControl::Github)
            .build();
        assert!(raw.pipeline_config);
        assert_eq!(raw.version_control, Some(VersionControl::Github));
    }

    #[test]
    fn test_or_prefers_self() {
        let flags = RawAnswersBuilder::new().base_url("https://flag.test");
        let file = RawAnswersBuilder::new()
            .base_url("https://file.test")
            .config_language(ConfigLanguage::TypeScript);

        let raw = flags.or(file).build();
        assert_eq!(raw.base_url, "https://flag.test");
        assert_eq!(raw.config_language, ConfigLanguage::TypeScript);
    }

    #[test]
    fn test_build_leaves_conditional_fields_unset() {
        let raw = RawAnswersBuilder::new()
            .test_design(true)
            .report_choice(true)
            .pipeline_config(true)
            .build();
        assert_eq!(raw.bundler, None);
        assert_eq!(raw.reporter, None);
        assert_eq!(raw.version_control, None);
    }

    #[test]
    fn test_build_with_defaults_fills_gated_fields() {
        let raw = RawAnswersBuilder::new()
            .test_design(true)
            .report_choice(true)
            .pipeline_config(true)
            .build_with_defaults();
        assert_eq!(raw.bundler, Some(Bundler::Browserify));
        assert_eq!(raw.reporter, Some(Reporter::Badeball));
        assert_eq!(raw.version_control, Some(VersionControl::Gitlab));
    }

    #[test]
    fn test_answers_file_rejects_unknown_keys() {
        let result: Result<RawAnswersBuilder, _> = serde_yaml::from_str("testFramework: Mocha\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_answers_file_accepts_partial_documents() {
        let builder: RawAnswersBuilder =
            serde_yaml::from_str("baseUrl: https://x.test\nreporter: allure\n").unwrap();
        assert_eq!(builder.base_url.as_deref(), Some("https://x.test"));
        assert_eq!(builder.reporter, Some(Reporter::Allure));
        assert_eq!(builder.report_choice, None);

        let builder = builder.with_implied_gates();
        assert_eq!(builder.report_choice, Some(true));
        assert_eq!(builder.pipeline_config, None);
    }
}
