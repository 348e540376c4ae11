//! Command-line interface implementation for create-modern-express.
//! Provides argument parsing and the text printed around a generation run.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::options::PackageManager;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(author, version, about = "Create a modern Express starter project", long_about = None)]
pub struct Args {
    /// Directory where the project will be created
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Module system: esm or cjs
    #[arg(long, value_name = "MODULE")]
    pub module: Option<String>,

    /// View engine: none, pug, ejs or hbs
    #[arg(long, value_name = "VIEW")]
    pub view: Option<String>,

    /// CSS strategy: none, postcss or tw
    #[arg(long, value_name = "POSTCSS")]
    pub postcss: Option<String>,

    /// Package manager: npm, yarn or pnpm
    #[arg(long, value_name = "PM")]
    pub pm: Option<String>,

    /// Use defaults for every choice not given on the command line
    #[arg(short, long)]
    pub yes: bool,

    /// Write into a non-empty directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Use templates from this directory instead of the bundled ones
    #[arg(long, value_name = "TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}

/// Version line printed before any prompt.
pub fn banner() -> String {
    format!("{} version {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Numbered follow-up commands for a project generated into `target`,
/// relative to `cwd`. The `cd` step is omitted when they are the same.
///
/// # Arguments
/// * `target` - Directory the project was generated into
/// * `cwd` - Directory the user runs the commands from
/// * `pm` - Package manager the commands are written for
///
/// # Returns
/// One line per step, already numbered and indented
pub fn next_steps(target: &Path, cwd: &Path, pm: PackageManager) -> Vec<String> {
    let mut commands = Vec::new();

    let relative = relative_path(target, cwd);
    if !relative.as_os_str().is_empty() {
        commands.push(format!("cd {}", relative.display()));
    }
    commands.push(pm.install_command());
    commands.push(r#"git init && git add -A && git commit -m "Initial commit" (optional)"#.to_string());
    commands.push(pm.run_command("start"));

    commands.into_iter().enumerate().map(|(i, cmd)| format!("  {}: {}", i + 1, cmd)).collect()
}

/// Path of `target` as seen from `base`. Both are resolved to absolute
/// paths; a target outside `base` is returned in absolute form.
fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target = std::path::absolute(target).unwrap_or_else(|_| target.to_path_buf());
    let base = std::path::absolute(base).unwrap_or_else(|_| base.to_path_buf());
    let strip_curdir = |p: &Path| -> PathBuf {
        p.components().filter(|c| !matches!(c, std::path::Component::CurDir)).collect()
    };
    let (target, base) = (strip_curdir(&target), strip_curdir(&base));
    match target.strip_prefix(&base) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => target,
    }
}
