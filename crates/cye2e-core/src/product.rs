//! Product identity and post-setup instructions

use crate::answers::{AnswerSet, Reporter};
use std::path::Path;

/// Internal product name (binary name, log target prefix)
pub const NAME: &str = "cye2e-cli";

/// Banner shown when the prompt flow starts
pub const DISPLAY_NAME: &str = "Cypress E2E Helper Bot";

/// CLI description shown in help text
pub const DESCRIPTION: &str = "Scaffold a Cypress end-to-end test project";

pub const DOCS_URL: &str = "https://docs.cypress.io";

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "CYE2E_LOG";

/// Follow-up commands once the files are written
///
/// `current` is the working directory the user started from; `installed` tells whether
/// dependencies were installed successfully during the run.
pub fn next_steps(
    dir: &Path,
    current: Option<&Path>,
    answers: &AnswerSet,
    installed: bool,
) -> Vec<String> {
    let mut steps = Vec::new();

    if current != Some(dir) {
        steps.push(format!("cd {}", dir.display()));
    }

    if !installed {
        steps.push("npm install".to_string());
    }

    steps.push("npx cypress open".to_string());
    steps.push("npx cypress run".to_string());

    match answers.reporter() {
        Some(Reporter::MultipleCucumber) => steps.push("node reportGen.js".to_string()),
        Some(Reporter::Allure) => {
            steps.push("npx allure generate allure-results --clean -o allure-report".to_string())
        }
        _ => {}
    }

    steps
}
