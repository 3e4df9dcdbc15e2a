//! cye2e CLI - Project scaffolding for Cypress end-to-end tests

use anyhow::Result;
use clap::Parser;
use cye2e_core::answers::{Bundler, ConfigLanguage, RawAnswersBuilder, Reporter, VersionControl};
use cye2e_core::product;
use cye2e_core::tui::CreateArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = product::NAME)]
#[command(about = product::DESCRIPTION)]
#[command(version)]
pub struct Args {
    /// Project directory to write into (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// YAML file with answers (camelCase keys, e.g. `baseUrl`)
    #[arg(short, long = "answers", value_name = "FILE")]
    pub answers_file: Option<PathBuf>,

    /// Configuration language (JavaScript, TypeScript, js, ts)
    #[arg(short, long)]
    pub language: Option<ConfigLanguage>,

    /// Base URL the tests navigate to
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Set up BDD (feature files and step definitions)
    #[arg(long)]
    pub bdd: bool,

    /// Bundler for the cucumber preprocessor (browserify, esbuild, webpack)
    #[arg(long)]
    pub bundler: Option<Bundler>,

    /// Reporter (mochawesome, allure, badeball, multipleCucumber)
    #[arg(long)]
    pub reporter: Option<Reporter>,

    /// CI pipeline provider (gitlab, github, bitbucket)
    #[arg(long, value_name = "PROVIDER")]
    pub pipeline: Option<VersionControl>,

    /// Write a .gitignore file
    #[arg(long)]
    pub gitignore: bool,

    /// Run npm install after creating the files
    #[arg(long)]
    pub install: bool,

    /// Auto-confirm all prompts and take defaults (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Print the files that would be created without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the project into a zip archive instead of a directory
    #[arg(long, value_name = "FILE", conflicts_with_all = ["directory", "install"])]
    pub archive: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Flags that answer a question; absent flags leave it open
    fn answers(&self) -> RawAnswersBuilder {
        let mut answers = RawAnswersBuilder::new();
        if let Some(language) = self.language {
            answers = answers.config_language(language);
        }
        if let Some(url) = &self.base_url {
            answers = answers.base_url(url.clone());
        }
        if self.bdd {
            answers = answers.test_design(true);
        }
        if let Some(bundler) = self.bundler {
            answers = answers.bundler(bundler);
        }
        if let Some(reporter) = self.reporter {
            answers = answers.reporter(reporter);
        }
        if let Some(provider) = self.pipeline {
            answers = answers.version_control(provider);
        }
        if self.gitignore {
            answers = answers.ignore_file(true);
        }
        if self.install {
            answers = answers.install_dependencies(true);
        }
        answers
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            answers: args.answers(),
            directory: args.directory,
            answers_file: args.answers_file,
            yes: args.yes,
            dry_run: args.dry_run,
            archive: args.archive,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(product::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(?args, "parsed arguments");

    let result = cye2e_core::run(args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
