//! Answer Set validation
//!
//! Checks run in a fixed priority order and the first violation is reported:
//! base URL, then bundler, then reporter, then pipeline provider.

use super::{
    join_choices, AnswerSet, BddReporter, Bundler, RawAnswers, Reporter, SpecReporter, TestDesign,
    VersionControl,
};
use url::Url;

/// A raw answer set violated a conditional-domain rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("baseUrl must not be empty")]
    EmptyBaseUrl,

    #[error("baseUrl '{value}' is not a valid absolute URL: {reason}")]
    MalformedBaseUrl { value: String, reason: String },

    #[error("bundler is required when testDesign (BDD) is enabled; expected one of: {expected}")]
    MissingBundler { expected: String },

    #[error("reporter is required when reportChoice is enabled; expected one of: {expected}")]
    MissingReporter { expected: String },

    #[error(
        "reporter '{reporter}' is not available when testDesign is {test_design}; expected one of: {expected}"
    )]
    ReporterOutOfDomain {
        reporter: Reporter,
        test_design: bool,
        expected: String,
    },

    #[error(
        "versionControl is required when pipelineConfig is enabled; expected one of: {expected}"
    )]
    MissingVersionControl { expected: String },
}

impl ValidationError {
    /// Name of the answer field at fault
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyBaseUrl | ValidationError::MalformedBaseUrl { .. } => "baseUrl",
            ValidationError::MissingBundler { .. } => "bundler",
            ValidationError::MissingReporter { .. }
            | ValidationError::ReporterOutOfDomain { .. } => "reporter",
            ValidationError::MissingVersionControl { .. } => "versionControl",
        }
    }
}

/// Check a raw answer set and normalize it into an [`AnswerSet`]
///
/// Conditional answers given while their gate is off (a bundler without BDD, a
/// reporter without `reportChoice`, a provider without `pipelineConfig`) carry no
/// meaning and are dropped.
pub fn validate(raw: &RawAnswers) -> Result<AnswerSet, ValidationError> {
    let base_url = check_base_url(&raw.base_url)?;

    let bundler = if raw.test_design {
        Some(raw.bundler.ok_or_else(|| ValidationError::MissingBundler {
            expected: join_choices(<Bundler as super::Choice>::ALL),
        })?)
    } else {
        if let Some(bundler) = raw.bundler {
            tracing::debug!(%bundler, "ignoring bundler: testDesign is off");
        }
        None
    };

    let reporter = if raw.report_choice {
        Some(check_reporter(raw.reporter, raw.test_design)?)
    } else {
        if let Some(reporter) = raw.reporter {
            tracing::debug!(%reporter, "ignoring reporter: reportChoice is off");
        }
        None
    };

    let pipeline = if raw.pipeline_config {
        Some(
            raw.version_control
                .ok_or_else(|| ValidationError::MissingVersionControl {
                    expected: join_choices(<VersionControl as super::Choice>::ALL),
                })?,
        )
    } else {
        if let Some(provider) = raw.version_control {
            tracing::debug!(%provider, "ignoring versionControl: pipelineConfig is off");
        }
        None
    };

    let design = match bundler {
        Some(bundler) => TestDesign::Bdd {
            bundler,
            reporter: reporter.map(bdd_reporter).transpose()?,
        },
        None => TestDesign::Spec {
            reporter: reporter.map(spec_reporter).transpose()?,
        },
    };

    Ok(AnswerSet {
        config_language: raw.config_language,
        base_url,
        design,
        pipeline,
        ignore_file: raw.ignore_file,
        install_dependencies: raw.install_dependencies,
    })
}

/// Check a base URL answer, returning the trimmed value
///
/// The value must be an `http` or `https` URL with a host. Also used by the prompt
/// flow to re-ask immediately.
pub fn check_base_url(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyBaseUrl);
    }

    let malformed = |reason: String| ValidationError::MalformedBaseUrl {
        value: trimmed.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| malformed(e.to_string()))?;

    // `localhost:3000` parses with "localhost" as the scheme
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(format!(
            "scheme '{}' is not http or https",
            url.scheme()
        )));
    }
    if !url.has_host() {
        return Err(malformed("missing host".to_string()));
    }

    // Injected verbatim, so keep the user's spelling rather than the parsed form
    Ok(trimmed.to_string())
}

fn check_reporter(reporter: Option<Reporter>, test_design: bool) -> Result<Reporter, ValidationError> {
    let domain = Reporter::domain(test_design);
    match reporter {
        None => Err(ValidationError::MissingReporter {
            expected: join_choices(domain),
        }),
        Some(reporter) if !domain.contains(&reporter) => {
            Err(ValidationError::ReporterOutOfDomain {
                reporter,
                test_design,
                expected: join_choices(domain),
            })
        }
        Some(reporter) => Ok(reporter),
    }
}

fn bdd_reporter(reporter: Reporter) -> Result<BddReporter, ValidationError> {
    match reporter {
        Reporter::Badeball => Ok(BddReporter::Badeball),
        Reporter::MultipleCucumber => Ok(BddReporter::MultipleCucumber),
        other => Err(out_of_domain(other, true)),
    }
}

fn spec_reporter(reporter: Reporter) -> Result<SpecReporter, ValidationError> {
    match reporter {
        Reporter::Mochawesome => Ok(SpecReporter::Mochawesome),
        Reporter::Allure => Ok(SpecReporter::Allure),
        other => Err(out_of_domain(other, false)),
    }
}

fn out_of_domain(reporter: Reporter, test_design: bool) -> ValidationError {
    ValidationError::ReporterOutOfDomain {
        reporter,
        test_design,
        expected: join_choices(Reporter::domain(test_design)),
    }
}
