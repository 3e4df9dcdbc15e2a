//! Answers file loading
//!
//! An answers file is a YAML mapping with the camelCase answer names. Every key is
//! optional; whatever it leaves out is asked interactively or defaulted.
//!
//! ```yaml
//! configLanguage: TypeScript
//! baseUrl: http://localhost:3000
//! testDesign: true
//! bundler: esbuild
//! reporter: badeball
//! ```

use crate::answers::RawAnswersBuilder;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse an answers document
pub fn parse_answers(content: &str) -> Result<RawAnswersBuilder> {
    // An empty document is a valid "answer nothing" file
    if content.trim().is_empty() {
        return Ok(RawAnswersBuilder::new());
    }

    let builder: RawAnswersBuilder =
        serde_yaml::from_str(content).context("Failed to parse answers file")?;
    Ok(builder.with_implied_gates())
}

/// Read and parse the answers file at `path`
pub async fn load_answers_file(path: &Path) -> Result<RawAnswersBuilder> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read answers file: {}", path.display()))?;

    let builder = parse_answers(&content)
        .with_context(|| format!("Invalid answers file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded answers file");
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Bundler, ConfigLanguage, Reporter, VersionControl};

    #[test]
    fn test_parse_full_document() {
        let builder = parse_answers(
            "configLanguage: TypeScript\n\
             baseUrl: http://localhost:3000\n\
             testDesign: true\n\
             bundler: esbuild\n\
             reportChoice: true\n\
             reporter: badeball\n\
             pipelineConfig: true\n\
             versionControl: github\n\
             ignoreFile: true\n\
             installDependencies: false\n",
        )
        .unwrap();

        let raw = builder.build();
        assert_eq!(raw.config_language, ConfigLanguage::TypeScript);
        assert_eq!(raw.base_url, "http://localhost:3000");
        assert!(raw.test_design);
        assert_eq!(raw.bundler, Some(Bundler::Esbuild));
        assert_eq!(raw.reporter, Some(Reporter::Badeball));
        assert_eq!(raw.version_control, Some(VersionControl::Github));
        assert!(raw.ignore_file);
        assert!(!raw.install_dependencies);
    }

    #[test]
    fn test_parse_accepts_command_line_spellings() {
        let raw = parse_answers(
            "configLanguage: ts\n\
             testDesign: true\n\
             bundler: ESBUILD\n\
             reporter: multiple-cucumber\n\
             versionControl: GitHub\n",
        )
        .unwrap()
        .build();

        assert_eq!(raw.config_language, ConfigLanguage::TypeScript);
        assert_eq!(raw.bundler, Some(Bundler::Esbuild));
        assert_eq!(raw.reporter, Some(Reporter::MultipleCucumber));
        assert!(raw.report_choice);
        assert_eq!(raw.version_control, Some(VersionControl::Github));
    }

    #[test]
    fn test_parse_unknown_value_lists_choices() {
        let err = parse_answers("reporter: junit\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("unknown reporter 'junit'"), "{}", message);
        assert!(message.contains("multipleCucumber"), "{}", message);
    }

    #[test]
    fn test_parse_implies_gates() {
        let builder = parse_answers("versionControl: bitbucket\n").unwrap();
        assert_eq!(builder.pipeline_config, Some(true));
        assert_eq!(builder.report_choice, None);
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_answers("\n").unwrap(), RawAnswersBuilder::new());
    }

    #[test]
    fn test_parse_rejects_unknown_keys_and_values() {
        assert!(parse_answers("testRunner: mocha\n").is_err());
        assert!(parse_answers("bundler: rollup\n").is_err());
    }

    #[tokio::test]
    async fn test_load_answers_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("answers.yaml");
        std::fs::write(&path, "reporter: mochawesome\n").unwrap();

        let builder = load_answers_file(&path).await.unwrap();
        assert_eq!(builder.reporter, Some(Reporter::Mochawesome));
        assert_eq!(builder.report_choice, Some(true));
    }

    #[tokio::test]
    async fn test_load_missing_file_names_path() {
        let err = load_answers_file(Path::new("/nonexistent/answers.yaml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/answers.yaml"));
    }
}
