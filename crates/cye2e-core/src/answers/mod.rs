//! Answer Set types
//!
//! Two shapes of the user's decisions live here:
//! - [`RawAnswers`]: the flat record collected from flags, an answers file or prompts.
//!   Conditional fields are plain options and may be inconsistent.
//! - [`AnswerSet`]: the validated value. Every selection dimension is an enum and the
//!   conditional domains are encoded in [`TestDesign`], so an inconsistent combination
//!   cannot be constructed.

pub mod builder;
pub mod validate;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use builder::RawAnswersBuilder;
pub use validate::{check_base_url, validate, ValidationError};

/// Default navigation target offered by the prompt flow
pub const DEFAULT_BASE_URL: &str = "https://example.cypress.io";

/// A closed set of named options (one per selection dimension)
pub trait Choice: Copy + Eq + Sized + 'static {
    /// Every option, in prompt order
    const ALL: &'static [Self];

    /// Name of the answer field this dimension fills
    const FIELD: &'static str;

    /// Canonical spelling, as written in answers files and on the command line
    fn as_str(self) -> &'static str;

    /// Extra spellings accepted when parsing
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    fn parse_choice(input: &str) -> Result<Self, UnknownChoice> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| {
                choice.as_str().eq_ignore_ascii_case(input)
                    || choice
                        .aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(input))
            })
            .ok_or_else(|| UnknownChoice {
                field: Self::FIELD,
                value: input.to_string(),
                expected: join_choices(Self::ALL),
            })
    }
}

/// Comma separated list of canonical names
pub fn join_choices<C: Choice>(choices: &[C]) -> String {
    choices
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A string did not name any option of a dimension
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}'; expected one of: {expected}")]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! impl_choice_traits {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Choice>::parse_choice(s)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        // Answers files accept the same spellings as the command line
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                value.parse().map_err(de::Error::custom)
            }
        }
    };
}

/// Syntax of the emitted config and spec files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConfigLanguage {
    #[default]
    JavaScript,
    TypeScript,
}

impl ConfigLanguage {
    /// File extension for config, support and spec files
    pub fn extension(self) -> &'static str {
        match self {
            ConfigLanguage::JavaScript => "js",
            ConfigLanguage::TypeScript => "ts",
        }
    }
}

impl Choice for ConfigLanguage {
    const ALL: &'static [Self] = &[ConfigLanguage::JavaScript, ConfigLanguage::TypeScript];
    const FIELD: &'static str = "configLanguage";

    fn as_str(self) -> &'static str {
        match self {
            ConfigLanguage::JavaScript => "JavaScript",
            ConfigLanguage::TypeScript => "TypeScript",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ConfigLanguage::JavaScript => &["js"],
            ConfigLanguage::TypeScript => &["ts"],
        }
    }
}

impl_choice_traits!(ConfigLanguage);

/// Module bundler used by the cucumber preprocessor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Bundler {
    #[default]
    Browserify,
    Esbuild,
    Webpack,
}

impl Choice for Bundler {
    const ALL: &'static [Self] = &[Bundler::Browserify, Bundler::Esbuild, Bundler::Webpack];
    const FIELD: &'static str = "bundler";

    fn as_str(self) -> &'static str {
        match self {
            Bundler::Browserify => "browserify",
            Bundler::Esbuild => "esbuild",
            Bundler::Webpack => "webpack",
        }
    }
}

impl_choice_traits!(Bundler);

/// Any reporter name, before its domain has been checked against `testDesign`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reporter {
    Mochawesome,
    Allure,
    Badeball,
    MultipleCucumber,
}

impl Reporter {
    /// Reporters that are meaningful for the given test design
    pub fn domain(test_design: bool) -> &'static [Reporter] {
        if test_design {
            &[Reporter::Badeball, Reporter::MultipleCucumber]
        } else {
            &[Reporter::Mochawesome, Reporter::Allure]
        }
    }

    /// First entry of [`Reporter::domain`], offered as the prompt default
    pub fn default_for(test_design: bool) -> Reporter {
        Self::domain(test_design)[0]
    }
}

impl Choice for Reporter {
    const ALL: &'static [Self] = &[
        Reporter::Mochawesome,
        Reporter::Allure,
        Reporter::Badeball,
        Reporter::MultipleCucumber,
    ];
    const FIELD: &'static str = "reporter";

    fn as_str(self) -> &'static str {
        match self {
            Reporter::Mochawesome => "mochawesome",
            Reporter::Allure => "allure",
            Reporter::Badeball => "badeball",
            Reporter::MultipleCucumber => "multipleCucumber",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Reporter::MultipleCucumber => &["multiple-cucumber"],
            _ => &[],
        }
    }
}

impl_choice_traits!(Reporter);

/// Reporters available for plain (non-BDD) spec files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecReporter {
    Mochawesome,
    Allure,
}

/// Reporters available in BDD mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BddReporter {
    Badeball,
    MultipleCucumber,
}

impl From<SpecReporter> for Reporter {
    fn from(reporter: SpecReporter) -> Self {
        match reporter {
            SpecReporter::Mochawesome => Reporter::Mochawesome,
            SpecReporter::Allure => Reporter::Allure,
        }
    }
}

impl From<BddReporter> for Reporter {
    fn from(reporter: BddReporter) -> Self {
        match reporter {
            BddReporter::Badeball => Reporter::Badeball,
            BddReporter::MultipleCucumber => Reporter::MultipleCucumber,
        }
    }
}

/// CI provider whose pipeline file is generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VersionControl {
    #[default]
    Gitlab,
    Github,
    Bitbucket,
}

impl Choice for VersionControl {
    const ALL: &'static [Self] = &[
        VersionControl::Gitlab,
        VersionControl::Github,
        VersionControl::Bitbucket,
    ];
    const FIELD: &'static str = "versionControl";

    fn as_str(self) -> &'static str {
        match self {
            VersionControl::Gitlab => "gitlab",
            VersionControl::Github => "github",
            VersionControl::Bitbucket => "bitbucket",
        }
    }
}

impl_choice_traits!(VersionControl);

/// Unvalidated answers, one field per question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswers {
    pub config_language: ConfigLanguage,
    pub base_url: String,
    pub test_design: bool,
    #[serde(default)]
    pub bundler: Option<Bundler>,
    pub report_choice: bool,
    #[serde(default)]
    pub reporter: Option<Reporter>,
    pub pipeline_config: bool,
    #[serde(default)]
    pub version_control: Option<VersionControl>,
    pub ignore_file: bool,
    pub install_dependencies: bool,
}

impl Default for RawAnswers {
    fn default() -> Self {
        Self {
            config_language: ConfigLanguage::JavaScript,
            base_url: DEFAULT_BASE_URL.to_string(),
            test_design: false,
            bundler: None,
            report_choice: false,
            reporter: None,
            pipeline_config: false,
            version_control: None,
            ignore_file: false,
            install_dependencies: false,
        }
    }
}

/// Test layout together with the choices that only exist for that layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestDesign {
    /// Plain `*.cy.*` spec files
    Spec { reporter: Option<SpecReporter> },
    /// Feature files and step definitions through the cucumber preprocessor
    Bdd {
        bundler: Bundler,
        reporter: Option<BddReporter>,
    },
}

/// A validated, normalized Answer Set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    pub config_language: ConfigLanguage,
    pub base_url: String,
    pub design: TestDesign,
    /// Pipeline provider; `None` when no pipeline was requested
    pub pipeline: Option<VersionControl>,
    pub ignore_file: bool,
    pub install_dependencies: bool,
}

impl AnswerSet {
    pub fn is_bdd(&self) -> bool {
        matches!(self.design, TestDesign::Bdd { .. })
    }

    pub fn is_typescript(&self) -> bool {
        self.config_language == ConfigLanguage::TypeScript
    }

    pub fn bundler(&self) -> Option<Bundler> {
        match self.design {
            TestDesign::Bdd { bundler, .. } => Some(bundler),
            TestDesign::Spec { .. } => None,
        }
    }

    /// Whether a reporter is configured (the `reportChoice` answer)
    pub fn report_choice(&self) -> bool {
        self.reporter().is_some()
    }

    pub fn reporter(&self) -> Option<Reporter> {
        match self.design {
            TestDesign::Spec { reporter } => reporter.map(Reporter::from),
            TestDesign::Bdd { reporter, .. } => reporter.map(Reporter::from),
        }
    }

    /// Flatten back into the question-per-field shape
    pub fn to_raw(&self) -> RawAnswers {
        RawAnswers {
            config_language: self.config_language,
            base_url: self.base_url.clone(),
            test_design: self.is_bdd(),
            bundler: self.bundler(),
            report_choice: self.report_choice(),
            reporter: self.reporter(),
            pipeline_config: self.pipeline.is_some(),
            version_control: self.pipeline,
            ignore_file: self.ignore_file,
            install_dependencies: self.install_dependencies,
        }
    }
}
