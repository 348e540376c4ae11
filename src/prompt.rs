//! Interactive collection of generation choices.
//! Choices given on the command line are never asked for again; defaults
//! live here, at the boundary, and never inside the option model.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select};

use crate::cli::Args;
use crate::error::{Error, Result};
use crate::filesystem::is_non_empty_dir;
use crate::options::RawOptions;

/// A selectable answer: label shown to the user and the raw value it maps to.
pub type Choice = (&'static str, &'static str);

pub const MODULE_CHOICES: [Choice; 2] =
    [("ES Modules (import/export)", "esm"), ("CommonJS (require/exports)", "cjs")];

pub const VIEW_CHOICES: [Choice; 4] = [
    ("Plain HTML without view engine", "none"),
    ("Pug (Jade)", "pug"),
    ("EJS", "ejs"),
    ("Handlebars", "hbs"),
];

pub const POSTCSS_CHOICES: [Choice; 3] = [
    ("No", "none"),
    ("Yes, with TailwindCSS", "tw"),
    ("Yes, without TailwindCSS", "postcss"),
];

pub const PM_CHOICES: [Choice; 3] = [("NPM", "npm"), ("Yarn", "yarn"), ("PNPM", "pnpm")];

/// Default selections as indexes into the choice tables.
pub const DEFAULT_MODULE: usize = 0;
pub const DEFAULT_VIEW: usize = 1;
pub const DEFAULT_POSTCSS: usize = 0;
pub const DEFAULT_PM: usize = 0;

/// Source of user answers.
pub trait Prompter {
    /// Asks a yes/no question; `skip` answers yes without asking.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: String, items: &[&str], default: usize) -> Result<usize>;

    /// Asks for free text; an empty answer is allowed.
    fn input(&self, prompt: String) -> Result<String>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn select(&self, prompt: String, items: &[&str], default: usize) -> Result<usize> {
        Ok(Select::new().with_prompt(prompt).default(default).items(items).interact()?)
    }

    fn input(&self, prompt: String) -> Result<String> {
        Ok(Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text()?)
    }
}

fn choose(
    prompter: &dyn Prompter,
    given: Option<&str>,
    use_default: bool,
    prompt: &str,
    choices: &[Choice],
    default: usize,
) -> Result<String> {
    if let Some(value) = given {
        return Ok(value.to_string());
    }
    if use_default {
        return Ok(choices[default].1.to_string());
    }
    let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
    let index = prompter.select(prompt.to_string(), &labels, default)?;
    Ok(choices[index].1.to_string())
}

/// Returns the target directory, asking for it when not given.
/// An empty answer means the current directory.
///
/// # Arguments
/// * `prompter` - Source of answers
/// * `args` - Parsed command line; `dir` wins, `--yes` means the current directory
///
/// # Errors
/// * `Error::Prompt` if the terminal interaction fails
pub fn target_dir(prompter: &dyn Prompter, args: &Args) -> Result<PathBuf> {
    if let Some(dir) = &args.dir {
        return Ok(dir.clone());
    }
    if args.yes {
        return Ok(PathBuf::from("."));
    }
    let answer = prompter.input("Where should we create your project? (Enter for current directory)".to_string())?;
    let answer = answer.trim();
    Ok(PathBuf::from(if answer.is_empty() { "." } else { answer }))
}

/// Refuses to write into a non-empty directory unless the user agrees.
///
/// Only `force` skips the question; `--yes` does not.
///
/// # Arguments
/// * `prompter` - Source of answers
/// * `target` - Directory the project will be generated into
/// * `force` - Write into a non-empty directory without asking
///
/// # Errors
/// * `Error::Aborted` if the user declines
/// * `Error::Prompt` if the terminal interaction fails
pub fn confirm_target(prompter: &dyn Prompter, target: &Path, force: bool) -> Result<()> {
    if !is_non_empty_dir(target) {
        return Ok(());
    }
    let proceed = prompter.confirm(force, "Directory not empty. Continue?".to_string())?;
    if !proceed {
        return Err(Error::Aborted(format!("'{}' is not empty", target.display())));
    }
    Ok(())
}

/// Collects the raw choices for `name`, prompting for anything missing.
///
/// # Returns
/// Raw option strings, validated later by `Options::try_from`
///
/// # Errors
/// * `Error::Prompt` if the terminal interaction fails
pub fn collect_options(prompter: &dyn Prompter, args: &Args, name: String) -> Result<RawOptions> {
    let yes = args.yes;
    Ok(RawOptions {
        name,
        module: choose(
            prompter,
            args.module.as_deref(),
            yes,
            "Select a module system",
            &MODULE_CHOICES,
            DEFAULT_MODULE,
        )?,
        view: choose(
            prompter,
            args.view.as_deref(),
            yes,
            "Select a view engine",
            &VIEW_CHOICES,
            DEFAULT_VIEW,
        )?,
        postcss: choose(
            prompter,
            args.postcss.as_deref(),
            yes,
            "Use PostCSS?",
            &POSTCSS_CHOICES,
            DEFAULT_POSTCSS,
        )?,
        pm: choose(
            prompter,
            args.pm.as_deref(),
            yes,
            "Select a package manager",
            &PM_CHOICES,
            DEFAULT_PM,
        )?,
    })
}
