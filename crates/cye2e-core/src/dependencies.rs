//! Dependency resolution for the generated `package.json`
//!
//! Each rule adds packages independently; entries keep the order in which rules
//! added them so the emitted `devDependencies` read the same way on every run.

use crate::answers::{AnswerSet, BddReporter, Bundler, SpecReporter, TestDesign};
use semver::VersionReq;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

pub const CYPRESS: &str = "cypress";
pub const CUCUMBER_PREPROCESSOR: &str = "@badeball/cypress-cucumber-preprocessor";
pub const BROWSERIFY_PREPROCESSOR: &str = "@cypress/browserify-preprocessor";
pub const ESBUILD_PREPROCESSOR: &str = "@bahmutov/cypress-esbuild-preprocessor";
pub const WEBPACK_PREPROCESSOR: &str = "@cypress/webpack-preprocessor";
pub const WEBPACK: &str = "webpack";
pub const MOCHAWESOME_REPORTER: &str = "cypress-mochawesome-reporter";
pub const ALLURE_COMMANDLINE: &str = "allure-commandline";
pub const ALLURE_CYPRESS: &str = "allure-cypress";
pub const MULTIPLE_CUCUMBER_REPORTER: &str = "multiple-cucumber-html-reporter";
pub const TYPESCRIPT: &str = "typescript";
pub const TS_LOADER: &str = "ts-loader";

/// Version constraint written into `devDependencies`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Float to whatever the registry tags as latest
    Latest,
    /// A pinned semver range such as `^3.8.2`
    Range(VersionReq),
}

impl VersionConstraint {
    /// Parse a pinned range, tolerating a leading `v` on the version
    pub fn range(spec: &str) -> Result<Self, semver::Error> {
        let cleaned = match spec.find(|c: char| c.is_ascii_digit()) {
            Some(idx) if spec[..idx].ends_with('v') => {
                format!("{}{}", &spec[..idx - 1], &spec[idx..])
            }
            _ => spec.to_string(),
        };
        VersionReq::parse(&cleaned).map(VersionConstraint::Range)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Latest => f.write_str("latest"),
            VersionConstraint::Range(req) => write!(f, "{}", req),
        }
    }
}

impl Serialize for VersionConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A dependency rule broke the resolver's contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DependencyError {
    #[error("dependency '{package}' already resolved to '{existing}', refusing to change it to '{requested}'")]
    Conflict {
        package: String,
        existing: VersionConstraint,
        requested: VersionConstraint,
    },

    #[error("dependency '{package}' has an invalid version range '{range}': {reason}")]
    InvalidRange {
        package: String,
        range: String,
        reason: String,
    },
}

/// Package name to version constraint, in insertion order, keys unique
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: Vec<(String, VersionConstraint)>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package
    ///
    /// Returns `Ok(true)` when the package was new and `Ok(false)` when it was already
    /// present with the same constraint. A different constraint for a present package
    /// is a [`DependencyError::Conflict`].
    pub fn insert(
        &mut self,
        package: &str,
        constraint: VersionConstraint,
    ) -> Result<bool, DependencyError> {
        match self.get(package) {
            Some(existing) if *existing == constraint => Ok(false),
            Some(existing) => Err(DependencyError::Conflict {
                package: package.to_string(),
                existing: existing.clone(),
                requested: constraint,
            }),
            None => {
                self.entries.push((package.to_string(), constraint));
                Ok(true)
            }
        }
    }

    pub fn insert_latest(&mut self, package: &str) -> Result<bool, DependencyError> {
        self.insert(package, VersionConstraint::Latest)
    }

    pub fn insert_pinned(&mut self, package: &str, range: &str) -> Result<bool, DependencyError> {
        let constraint =
            VersionConstraint::range(range).map_err(|e| DependencyError::InvalidRange {
                package: package.to_string(),
                range: range.to_string(),
                reason: e.to_string(),
            })?;
        self.insert(package, constraint)
    }

    pub fn get(&self, package: &str) -> Option<&VersionConstraint> {
        self.entries
            .iter()
            .find(|(name, _)| name == package)
            .map(|(_, constraint)| constraint)
    }

    pub fn contains(&self, package: &str) -> bool {
        self.get(package).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionConstraint)> {
        self.entries
            .iter()
            .map(|(name, constraint)| (name.as_str(), constraint))
    }
}

impl Serialize for DependencySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, constraint) in &self.entries {
            map.serialize_entry(name, constraint)?;
        }
        map.end()
    }
}

// Reporter packages are pinned, everything else floats
const MOCHAWESOME_RANGE: &str = "^3.8.2";
const ALLURE_COMMANDLINE_RANGE: &str = "^2.29.0";
const ALLURE_CYPRESS_RANGE: &str = "^2.15.1";

/// Derive every package the answers require
pub fn resolve(answers: &AnswerSet) -> Result<DependencySet, DependencyError> {
    let mut deps = DependencySet::new();
    deps.insert_latest(CYPRESS)?;

    match answers.design {
        TestDesign::Bdd { bundler, reporter } => {
            deps.insert_latest(CUCUMBER_PREPROCESSOR)?;
            match bundler {
                Bundler::Browserify => {
                    deps.insert_latest(BROWSERIFY_PREPROCESSOR)?;
                }
                Bundler::Esbuild => {
                    deps.insert_latest(ESBUILD_PREPROCESSOR)?;
                }
                Bundler::Webpack => {
                    deps.insert_latest(WEBPACK_PREPROCESSOR)?;
                    deps.insert_latest(WEBPACK)?;
                }
            }

            // Badeball reporting is built into the preprocessor
            if reporter == Some(BddReporter::MultipleCucumber) {
                deps.insert_latest(MULTIPLE_CUCUMBER_REPORTER)?;
            }
        }
        TestDesign::Spec { reporter } => match reporter {
            Some(SpecReporter::Mochawesome) => {
                deps.insert_pinned(MOCHAWESOME_REPORTER, MOCHAWESOME_RANGE)?;
            }
            Some(SpecReporter::Allure) => {
                deps.insert_pinned(ALLURE_COMMANDLINE, ALLURE_COMMANDLINE_RANGE)?;
                deps.insert_pinned(ALLURE_CYPRESS, ALLURE_CYPRESS_RANGE)?;
            }
            None => {}
        },
    }

    if answers.is_typescript() {
        deps.insert_latest(TYPESCRIPT)?;
        if answers.bundler() == Some(Bundler::Webpack) {
            deps.insert_latest(TS_LOADER)?;
        }
    }

    tracing::debug!(count = deps.len(), "resolved dependencies");
    Ok(deps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{ConfigLanguage, VersionControl};

    fn answers(language: ConfigLanguage, design: TestDesign) -> AnswerSet {
        AnswerSet {
            config_language: language,
            base_url: "https://x.test".to_string(),
            design,
            pipeline: Some(VersionControl::Gitlab),
            ignore_file: true,
            install_dependencies: false,
        }
    }

    fn names(deps: &DependencySet) -> Vec<&str> {
        deps.names().collect()
    }

    #[test]
    fn test_baseline_only_needs_cypress() {
        let deps = resolve(&answers(
            ConfigLanguage::JavaScript,
            TestDesign::Spec { reporter: None },
        ))
        .unwrap();
        assert_eq!(names(&deps), vec![CYPRESS]);
        assert_eq!(deps.get(CYPRESS), Some(&VersionConstraint::Latest));
    }

    #[test]
    fn test_bdd_webpack_adds_adapter_and_webpack() {
        let deps = resolve(&answers(
            ConfigLanguage::JavaScript,
            TestDesign::Bdd {
                bundler: Bundler::Webpack,
                reporter: None,
            },
        ))
        .unwrap();
        assert_eq!(
            names(&deps),
            vec![CYPRESS, CUCUMBER_PREPROCESSOR, WEBPACK_PREPROCESSOR, WEBPACK]
        );
        assert!(!deps.contains(TS_LOADER));
    }

    #[test]
    fn test_typescript_webpack_adds_loader() {
        let deps = resolve(&answers(
            ConfigLanguage::TypeScript,
            TestDesign::Bdd {
                bundler: Bundler::Webpack,
                reporter: None,
            },
        ))
        .unwrap();
        assert!(deps.contains(WEBPACK_PREPROCESSOR));
        assert!(deps.contains(WEBPACK));
        assert!(deps.contains(TYPESCRIPT));
        assert!(deps.contains(TS_LOADER));
    }

    #[test]
    fn test_bdd_esbuild_typescript() {
        let deps = resolve(&answers(
            ConfigLanguage::TypeScript,
            TestDesign::Bdd {
                bundler: Bundler::Esbuild,
                reporter: None,
            },
        ))
        .unwrap();
        assert_eq!(
            names(&deps),
            vec![CYPRESS, CUCUMBER_PREPROCESSOR, ESBUILD_PREPROCESSOR, TYPESCRIPT]
        );
    }

    #[test]
    fn test_badeball_reporting_adds_nothing() {
        let deps = resolve(&answers(
            ConfigLanguage::JavaScript,
            TestDesign::Bdd {
                bundler: Bundler::Browserify,
                reporter: Some(BddReporter::Badeball),
            },
        ))
        .unwrap();
        assert_eq!(
            names(&deps),
            vec![CYPRESS, CUCUMBER_PREPROCESSOR, BROWSERIFY_PREPROCESSOR]
        );
    }

    #[test]
    fn test_multiple_cucumber_adds_report_generator() {
        let deps = resolve(&answers(
            ConfigLanguage::JavaScript,
            TestDesign::Bdd {
                bundler: Bundler::Browserify,
                reporter: Some(BddReporter::MultipleCucumber),
            },
        ))
        .unwrap();
        assert_eq!(
            deps.get(MULTIPLE_CUCUMBER_REPORTER),
            Some(&VersionConstraint::Latest)
        );
    }

    #[test]
    fn test_spec_reporters_are_pinned() {
        let deps = resolve(&answers(
            ConfigLanguage::JavaScript,
            TestDesign::Spec {
                reporter: Some(SpecReporter::Mochawesome),
            },
        ))
        .unwrap();
        assert_eq!(deps.get(MOCHAWESOME_REPORTER).unwrap().to_string(), "^3.8.2");

        let deps = resolve(&answers(
            ConfigLanguage::JavaScript,
            TestDesign::Spec {
                reporter: Some(SpecReporter::Allure),
            },
        ))
        .unwrap();
        assert_eq!(deps.get(ALLURE_COMMANDLINE).unwrap().to_string(), "^2.29.0");
        assert_eq!(deps.get(ALLURE_CYPRESS).unwrap().to_string(), "^2.15.1");
        assert!(!deps.contains(CUCUMBER_PREPROCESSOR));
    }

    #[test]
    fn test_reinsert_same_constraint_is_noop() {
        let mut deps = DependencySet::new();
        assert_eq!(deps.insert_latest(CYPRESS), Ok(true));
        assert_eq!(deps.insert_latest(CYPRESS), Ok(false));
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn test_reinsert_different_constraint_conflicts() {
        let mut deps = DependencySet::new();
        deps.insert_latest(MOCHAWESOME_REPORTER).unwrap();
        let err = deps
            .insert_pinned(MOCHAWESOME_REPORTER, MOCHAWESOME_RANGE)
            .unwrap_err();
        assert!(matches!(
            err,
            DependencyError::Conflict { ref package, .. } if package == MOCHAWESOME_REPORTER
        ));
        assert_eq!(deps.get(MOCHAWESOME_REPORTER), Some(&VersionConstraint::Latest));
    }

    #[test]
    fn test_range_tolerates_leading_v() {
        let constraint = VersionConstraint::range("^v2.15.1").unwrap();
        assert_eq!(constraint.to_string(), "^2.15.1");
        assert!(VersionConstraint::range("not a range").is_err());
    }

    #[test]
    fn test_insert_pinned_reports_invalid_range() {
        let mut deps = DependencySet::new();
        let err = deps.insert_pinned(ALLURE_CYPRESS, "two point fifteen").unwrap_err();
        assert!(matches!(err, DependencyError::InvalidRange { .. }));
        assert!(deps.is_empty());
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let mut deps = DependencySet::new();
        deps.insert_latest(WEBPACK).unwrap();
        deps.insert_pinned(ALLURE_CYPRESS, ALLURE_CYPRESS_RANGE).unwrap();
        let json = serde_json::to_string(&deps).unwrap();
        assert_eq!(json, r#"{"webpack":"latest","allure-cypress":"^2.15.1"}"#);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let input = answers(
            ConfigLanguage::TypeScript,
            TestDesign::Bdd {
                bundler: Bundler::Webpack,
                reporter: Some(BddReporter::MultipleCucumber),
            },
        );
        assert_eq!(resolve(&input).unwrap(), resolve(&input).unwrap());
    }
}
