use create_modern_express::cli::{next_steps, Args};
use create_modern_express::error::{Error, Result};
use create_modern_express::options::{Options, PackageManager, PostCss, ViewEngine};
use create_modern_express::prompt::{collect_options, confirm_target, target_dir, Prompter};
use clap::Parser;
use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("create-modern-express")];
    res.extend(args.iter().map(OsString::from));
    res
}

/// Answers selections from a queue and records every question asked.
struct ScriptedPrompter {
    selections: RefCell<Vec<usize>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn new(selections: &[usize]) -> Self {
        Self { selections: RefCell::new(selections.to_vec()), asked: RefCell::new(Vec::new()) }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        self.asked.borrow_mut().push(prompt);
        Ok(skip)
    }

    fn select(&self, prompt: String, _items: &[&str], _default: usize) -> Result<usize> {
        self.asked.borrow_mut().push(prompt);
        Ok(self.selections.borrow_mut().remove(0))
    }

    fn input(&self, prompt: String) -> Result<String> {
        self.asked.borrow_mut().push(prompt);
        Ok("  ".to_string())
    }
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["./my-app"])).unwrap();

    assert_eq!(parsed.dir, Some(PathBuf::from("./my-app")));
    assert!(parsed.module.is_none());
    assert!(!parsed.force);
    assert!(!parsed.verbose);
    assert!(!parsed.yes);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--module", "cjs", "--view", "ejs", "--postcss", "tw", "--pm", "pnpm", "--force",
        "--verbose", "--yes", "--templates", "/tmp/templates", "out",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.module.as_deref(), Some("cjs"));
    assert_eq!(parsed.view.as_deref(), Some("ejs"));
    assert_eq!(parsed.postcss.as_deref(), Some("tw"));
    assert_eq!(parsed.pm.as_deref(), Some("pnpm"));
    assert_eq!(parsed.templates, Some(PathBuf::from("/tmp/templates")));
    assert!(parsed.force && parsed.verbose && parsed.yes);
}

#[test]
fn test_directory_is_optional() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();
    assert!(parsed.dir.is_none());
}

#[test]
fn test_too_many_args() {
    assert!(Args::try_parse_from(make_args(&["one", "two"])).is_err());
}

#[test]
fn test_flags_skip_prompts() {
    let args = Args::try_parse_from(make_args(&[
        "--module", "esm", "--view", "none", "--postcss", "postcss", "--pm", "yarn", "app",
    ]))
    .unwrap();
    let prompter = ScriptedPrompter::new(&[]);

    let raw = collect_options(&prompter, &args, "app".to_string()).unwrap();
    let options = Options::try_from(raw).unwrap();

    assert!(prompter.asked.borrow().is_empty());
    assert_eq!(options.view(), None);
    assert_eq!(options.postcss(), Some(PostCss::Plain));
    assert_eq!(options.package_manager(), PackageManager::Yarn);
}

#[test]
fn test_missing_choices_are_prompted() {
    let args = Args::try_parse_from(make_args(&["--module", "cjs", "app"])).unwrap();
    // view: Handlebars, postcss: Yes with Tailwind, pm: PNPM
    let prompter = ScriptedPrompter::new(&[3, 1, 2]);

    let options =
        Options::try_from(collect_options(&prompter, &args, "app".to_string()).unwrap()).unwrap();

    assert_eq!(prompter.asked.borrow().len(), 3);
    assert_eq!(options.view(), Some(ViewEngine::Hbs));
    assert_eq!(options.postcss(), Some(PostCss::Tailwind));
    assert_eq!(options.package_manager(), PackageManager::Pnpm);
}

#[test]
fn test_yes_uses_defaults() {
    let args = Args::try_parse_from(make_args(&["--yes"])).unwrap();
    let prompter = ScriptedPrompter::new(&[]);

    assert_eq!(target_dir(&prompter, &args).unwrap(), PathBuf::from("."));
    let options =
        Options::try_from(collect_options(&prompter, &args, "app".to_string()).unwrap()).unwrap();

    assert!(prompter.asked.borrow().is_empty());
    assert!(options.module().is_esm());
    assert_eq!(options.view(), Some(ViewEngine::Pug));
    assert_eq!(options.postcss(), None);
    assert_eq!(options.package_manager(), PackageManager::Npm);
}

#[test]
fn test_blank_directory_answer_means_current() {
    let args = Args::try_parse_from(make_args(&[])).unwrap();
    let prompter = ScriptedPrompter::new(&[]);

    assert_eq!(target_dir(&prompter, &args).unwrap(), PathBuf::from("."));
    assert_eq!(prompter.asked.borrow().len(), 1);
}

#[test]
fn test_yes_still_confirms_non_empty_target() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "# mine\n").unwrap();
    let target = temp.path().to_str().unwrap();
    let args = Args::try_parse_from(make_args(&["--yes", target])).unwrap();
    let prompter = ScriptedPrompter::new(&[]);

    let err = confirm_target(&prompter, temp.path(), args.force).unwrap_err();

    assert!(matches!(err, Error::Aborted(_)));
    assert_eq!(*prompter.asked.borrow(), ["Directory not empty. Continue?"]);
    assert_eq!(fs::read_to_string(temp.path().join("README.md")).unwrap(), "# mine\n");
}

#[test]
fn test_force_skips_non_empty_confirmation() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "# mine\n").unwrap();
    let target = temp.path().to_str().unwrap();
    let args = Args::try_parse_from(make_args(&["--force", target])).unwrap();
    let prompter = ScriptedPrompter::new(&[]);

    assert!(confirm_target(&prompter, temp.path(), args.force).is_ok());
}

#[test]
fn test_empty_target_is_not_confirmed() {
    let temp = TempDir::new().unwrap();
    let prompter = ScriptedPrompter::new(&[]);

    assert!(confirm_target(&prompter, temp.path(), false).is_ok());
    assert!(confirm_target(&prompter, &temp.path().join("new"), false).is_ok());
    assert!(prompter.asked.borrow().is_empty());
}

#[test]
fn test_next_steps_in_subdirectory() {
    let steps = next_steps(Path::new("/work/app"), Path::new("/work"), PackageManager::Pnpm);
    assert_eq!(
        steps,
        [
            "  1: cd app",
            "  2: pnpm install",
            r#"  3: git init && git add -A && git commit -m "Initial commit" (optional)"#,
            "  4: pnpm run start",
        ]
    );
}

#[test]
fn test_next_steps_in_current_directory() {
    let steps = next_steps(Path::new("/work/."), Path::new("/work"), PackageManager::Npm);
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0], "  1: npm install");
}
