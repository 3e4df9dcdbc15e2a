//! Charm-style CLI prompts using cliclack

use crate::answers::{
    check_base_url, Bundler, Choice, ConfigLanguage, RawAnswers, RawAnswersBuilder, Reporter,
    ValidationError, VersionControl, DEFAULT_BASE_URL,
};
use crate::engine::{self, Resolution};
use crate::runtime::{check, Installer};
use crate::{config, product, writer};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create flow
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project directory to write into (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// YAML answers file
    pub answers_file: Option<PathBuf>,

    /// Answers given as flags; these win over the answers file
    pub answers: RawAnswersBuilder,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Print the files that would be written and stop
    pub dry_run: bool,

    /// Write a zip archive at this path instead of a directory tree
    pub archive: Option<PathBuf>,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(format!("{} v{}", product::DISPLAY_NAME, cli_version))?;

    // Step 1: Collect answers (flags, then answers file, then prompts)
    let raw = collect_answers(&args).await?;

    // Step 2: Resolve everything in memory before touching the disk
    let resolution = resolve(&raw)?;

    // Step 3: Dry run or archive output stop here
    if args.dry_run {
        print_manifest(&resolution)?;
        cliclack::outro("Dry run, nothing written.")?;
        return Ok(());
    }

    if let Some(archive) = &args.archive {
        if let Some(notice) = archive_install_notice(&resolution) {
            cliclack::log::warning(notice)?;
        }
        let size = writer::write_archive(&resolution.manifest, archive).await?;
        cliclack::outro(format!(
            "Wrote {} files to {} ({} bytes)",
            resolution.manifest.len(),
            archive.display(),
            size
        ))?;
        return Ok(());
    }

    // Step 4: Select directory
    let project_dir = select_directory(&args)?;

    // Step 5: Write files
    create_project(&resolution, &project_dir).await?;

    // Step 6: Install dependencies (never fatal)
    let installed = resolution.answers.install_dependencies && install(&project_dir).await?;

    // Step 7: Show next steps
    print_next_steps(&project_dir, &resolution, installed)?;

    Ok(())
}

/// Archives are never installed into; say so when an install was requested
fn archive_install_notice(resolution: &Resolution) -> Option<&'static str> {
    resolution.answers.install_dependencies.then_some(
        "Dependencies are not installed into an archive; run `npm install` after extracting it.",
    )
}

async fn collect_answers(args: &CreateArgs) -> Result<RawAnswers> {
    let mut layered = args.answers.clone().with_implied_gates();

    if let Some(path) = &args.answers_file {
        let file = config::load_answers_file(path).await?;
        cliclack::log::info(format!("Using answers from {}", path.display()))?;
        layered = layered.or(file);
    }

    if args.yes {
        return Ok(layered.build_with_defaults());
    }

    prompt_missing(layered)
}

/// Ask every question not already answered, in the fixed order
fn prompt_missing(mut answers: RawAnswersBuilder) -> Result<RawAnswers> {
    if answers.config_language.is_none() {
        answers.config_language = Some(select_choice(
            "Which configuration language do you want to use?",
            ConfigLanguage::ALL,
            ConfigLanguage::default(),
        )?);
    }

    if answers.base_url.is_none() {
        let url: String = cliclack::input("What is the base URL for your tests?")
            .placeholder(DEFAULT_BASE_URL)
            .default_input(DEFAULT_BASE_URL)
            .validate(|input: &String| base_url_input(input))
            .interact()?;
        answers.base_url = Some(url);
    }

    let test_design = ask_once(&mut answers.test_design, "Do you want to setup BDD?")?;
    let report_choice = ask_once(&mut answers.report_choice, "Do you want to setup a reporter?")?;
    let pipeline_config =
        ask_once(&mut answers.pipeline_config, "Do you want to setup a pipeline?")?;
    ask_once(&mut answers.ignore_file, "Do you want to a .gitignore file?")?;
    ask_once(
        &mut answers.install_dependencies,
        "Do you want to run npm install after creating the files?",
    )?;

    if test_design && answers.bundler.is_none() {
        answers.bundler = Some(select_choice(
            "Which bundler do you prefer?",
            Bundler::ALL,
            Bundler::default(),
        )?);
    }

    if report_choice && answers.reporter.is_none() {
        answers.reporter = Some(select_choice(
            "Which reporter do you prefer?",
            Reporter::domain(test_design),
            Reporter::default_for(test_design),
        )?);
    }

    if pipeline_config && answers.version_control.is_none() {
        answers.version_control = Some(select_choice(
            "Which version control tool do you prefer?",
            VersionControl::ALL,
            VersionControl::default(),
        )?);
    }

    Ok(answers.build())
}

/// Prompt-time base URL check, so a bad value is re-asked before the next question
fn base_url_input(input: &str) -> Result<(), ValidationError> {
    check_base_url(input).map(|_| ())
}

/// Yes/no question, skipped when already answered
fn ask_once(slot: &mut Option<bool>, question: &str) -> Result<bool> {
    if let Some(answer) = *slot {
        return Ok(answer);
    }
    let answer: bool = cliclack::confirm(question).initial_value(false).interact()?;
    *slot = Some(answer);
    Ok(answer)
}

fn select_choice<C: Choice>(question: &str, options: &[C], initial: C) -> Result<C> {
    let mut select = cliclack::select(question);
    for &option in options {
        select = select.item(option, option.as_str(), "");
    }
    Ok(select.initial_value(initial).interact()?)
}

fn resolve(raw: &RawAnswers) -> Result<Resolution> {
    match engine::resolve_project(raw) {
        Ok(resolution) => Ok(resolution),
        Err(e) if e.is_user_error() => {
            cliclack::log::error(e.to_string())?;
            Err(e.into())
        }
        Err(e) => {
            tracing::error!(error = %e, "resolution failed");
            Err(anyhow::Error::new(e).context("Failed to assemble the project files"))
        }
    }
}

fn print_manifest(resolution: &Resolution) -> Result<()> {
    let packages: Vec<String> = resolution
        .dependencies
        .iter()
        .map(|(name, version)| format!("{}@{}", name, version))
        .collect();
    cliclack::log::info(format!("devDependencies: {}", packages.join(", ")))?;

    for path in resolution.manifest.paths() {
        println!("{}", path);
    }
    Ok(())
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let path = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };
    cliclack::log::info(format!("Using directory: {}", path.display()))?;

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "Directory has {} existing items; generated files will overwrite matching paths",
                    count
                ))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

async fn create_project(resolution: &Resolution, project_dir: &Path) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match writer::write_manifest(&resolution.manifest, project_dir).await {
        Ok(written) => {
            spinner.stop(format!(
                "Created {} files in {}",
                written.len(),
                project_dir.display()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Failed to write project files");
            Err(e)
        }
    }
}

/// Returns whether dependencies ended up installed
async fn install(project_dir: &Path) -> Result<bool> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes() {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes.iter().map(ToString::to_string).collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::warning(format!("{}\nSkipping npm install.", e))?;
            return Ok(false);
        }
    }

    match Installer::npm(project_dir).run().await {
        Ok(()) => {
            cliclack::log::success("Dependencies installed")?;
            Ok(true)
        }
        Err(e) => {
            cliclack::log::warning(format!("npm install did not complete: {}", e))?;
            Ok(false)
        }
    }
}

fn print_next_steps(project_dir: &Path, resolution: &Resolution, installed: bool) -> Result<()> {
    let current = std::env::current_dir().ok();
    let steps = product::next_steps(
        project_dir,
        current.as_deref(),
        &resolution.answers,
        installed,
    );

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Happy testing! Docs: {}", product::DOCS_URL))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_install_notice_only_when_install_requested() {
        let plain = engine::resolve_project(&RawAnswersBuilder::new().build()).unwrap();
        assert!(archive_install_notice(&plain).is_none());

        let raw = RawAnswersBuilder::new().install_dependencies(true).build();
        let install = engine::resolve_project(&raw).unwrap();
        assert!(archive_install_notice(&install)
            .unwrap()
            .contains("npm install"));
    }

    #[tokio::test]
    async fn test_yes_mode_takes_defaults() {
        let args = CreateArgs {
            yes: true,
            answers: RawAnswersBuilder::new().test_design(true),
            ..Default::default()
        };
        let raw = collect_answers(&args).await.unwrap();
        assert!(raw.test_design);
        assert_eq!(raw.bundler, Some(Bundler::Browserify));
        assert_eq!(raw.reporter, None);
        assert_eq!(raw.base_url, DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_flags_override_answers_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("answers.yaml");
        std::fs::write(
            &path,
            "baseUrl: https://file.test\nconfigLanguage: TypeScript\nreporter: allure\n",
        )
        .unwrap();

        let args = CreateArgs {
            yes: true,
            answers_file: Some(path),
            answers: RawAnswersBuilder::new().base_url("https://flag.test"),
            ..Default::default()
        };
        let raw = collect_answers(&args).await.unwrap();
        assert_eq!(raw.base_url, "https://flag.test");
        assert_eq!(raw.config_language, ConfigLanguage::TypeScript);
        assert!(raw.report_choice);
        assert_eq!(raw.reporter, Some(Reporter::Allure));
    }

    #[test]
    fn test_base_url_input_rejects_scheme_less_hosts() {
        assert!(base_url_input("https://example.cypress.io").is_ok());
        let err = base_url_input("example.com").unwrap_err();
        assert_eq!(err.field(), "baseUrl");
        assert!(base_url_input("localhost:3000").is_err());
        assert_eq!(base_url_input("  "), Err(ValidationError::EmptyBaseUrl));
    }

    #[test]
    fn test_ask_once_keeps_existing_answer() {
        let mut slot = Some(true);
        assert!(ask_once(&mut slot, "unused").unwrap());
        assert_eq!(slot, Some(true));
    }

    #[test]
    fn test_prompt_missing_with_everything_answered() {
        let answers = RawAnswersBuilder::from(RawAnswers {
            test_design: true,
            bundler: Some(Bundler::Webpack),
            ..RawAnswers::default()
        });
        let raw = prompt_missing(answers).unwrap();
        assert_eq!(raw.bundler, Some(Bundler::Webpack));
    }
}
