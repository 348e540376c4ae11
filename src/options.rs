//! The validated set of choices that drives project generation.
//!
//! Every mapping from a choice to a concrete value (file extension, npm
//! package, command) is an exhaustive `match` on the enum, so adding a variant
//! fails to compile until every table covers it.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Module loading convention for generated scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSystem {
    Esm,
    Cjs,
}

impl ModuleSystem {
    pub const ALL: [ModuleSystem; 2] = [ModuleSystem::Esm, ModuleSystem::Cjs];

    /// Extension used for every generated script file.
    pub fn script_extension(self) -> &'static str {
        match self {
            ModuleSystem::Esm => "js",
            ModuleSystem::Cjs => "cjs",
        }
    }

    /// True when scripts use `import`/`export` and the manifest declares
    /// `"type": "module"`.
    pub fn is_esm(self) -> bool {
        matches!(self, ModuleSystem::Esm)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleSystem::Esm => "esm",
            ModuleSystem::Cjs => "cjs",
        }
    }
}

/// Server-side view templating engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewEngine {
    Pug,
    Ejs,
    Hbs,
}

impl ViewEngine {
    pub const ALL: [ViewEngine; 3] = [ViewEngine::Pug, ViewEngine::Ejs, ViewEngine::Hbs];

    /// npm package name and version range for the engine.
    pub fn package(self) -> (&'static str, &'static str) {
        match self {
            ViewEngine::Pug => ("pug", "^3.0.2"),
            ViewEngine::Ejs => ("ejs", "^3.1.9"),
            ViewEngine::Hbs => ("hbs", "^4.2.0"),
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            ViewEngine::Pug => "pug",
            ViewEngine::Ejs => "ejs",
            ViewEngine::Hbs => "hbs",
        }
    }

    /// EJS composes its layout inline through includes, so it ships no
    /// separate layout file.
    pub fn has_layout(self) -> bool {
        match self {
            ViewEngine::Pug | ViewEngine::Hbs => true,
            ViewEngine::Ejs => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.file_extension()
    }
}

/// CSS post-processing strategy, when one is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCss {
    /// PostCSS with autoprefixer only.
    Plain,
    /// PostCSS plus TailwindCSS.
    Tailwind,
}

impl PostCss {
    pub const ALL: [PostCss; 2] = [PostCss::Plain, PostCss::Tailwind];

    pub fn as_str(self) -> &'static str {
        match self {
            PostCss::Plain => "plain",
            PostCss::Tailwind => "tailwind",
        }
    }
}

/// Package manager used in the printed follow-up commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] =
        [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

    pub fn as_str(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Command that installs the project's dependencies, e.g. `pnpm install`.
    pub fn install_command(self) -> String {
        format!("{} install", self.as_str())
    }

    /// Command that runs a manifest script.
    ///
    /// # Arguments
    /// * `script` - Key under `scripts` in `package.json`
    pub fn run_command(self, script: &str) -> String {
        format!("{} run {script}", self.as_str())
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(ModuleSystem, ViewEngine, PostCss, PackageManager);

impl FromStr for ModuleSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "esm" => Ok(ModuleSystem::Esm),
            "cjs" => Ok(ModuleSystem::Cjs),
            _ => Err(invalid("module", s)),
        }
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            _ => Err(invalid("pm", s)),
        }
    }
}

/// Parses a view choice; `none` or an empty string selects static HTML.
///
/// # Returns
/// `None` for static HTML, otherwise the engine
///
/// # Errors
/// * `Error::InvalidOption` for any other spelling
pub fn parse_view(s: &str) -> Result<Option<ViewEngine>> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "html" => Ok(None),
        "pug" => Ok(Some(ViewEngine::Pug)),
        "ejs" => Ok(Some(ViewEngine::Ejs)),
        "hbs" => Ok(Some(ViewEngine::Hbs)),
        _ => Err(invalid("view", s)),
    }
}

/// Parses a CSS strategy; `none` or an empty string disables PostCSS.
///
/// # Errors
/// * `Error::InvalidOption` for any other spelling
pub fn parse_postcss(s: &str) -> Result<Option<PostCss>> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "none" => Ok(None),
        "postcss" | "plain" => Ok(Some(PostCss::Plain)),
        "tw" | "tailwind" => Ok(Some(PostCss::Tailwind)),
        _ => Err(invalid("postcss", s)),
    }
}

fn invalid(field: &'static str, value: &str) -> Error {
    Error::InvalidOption { field, value: value.to_string() }
}

/// Unvalidated answers as a prompt or flag layer produces them.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub name: String,
    pub module: String,
    pub view: String,
    pub postcss: String,
    pub pm: String,
}

/// Validated generation options. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    name: String,
    module: ModuleSystem,
    view: Option<ViewEngine>,
    postcss: Option<PostCss>,
    pm: PackageManager,
}

impl Options {
    /// Creates options from typed choices.
    ///
    /// # Errors
    /// * `Error::InvalidOption` if `name` is empty after trimming
    pub fn new<S: AsRef<str>>(
        name: S,
        module: ModuleSystem,
        view: Option<ViewEngine>,
        postcss: Option<PostCss>,
        pm: PackageManager,
    ) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(invalid("name", name));
        }
        Ok(Self { name: name.to_string(), module, view, postcss, pm })
    }

    /// Trimmed project name, used as the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> ModuleSystem {
        self.module
    }

    /// Selected view engine, `None` for static HTML.
    pub fn view(&self) -> Option<ViewEngine> {
        self.view
    }

    /// Selected CSS strategy, `None` when PostCSS is not used.
    pub fn postcss(&self) -> Option<PostCss> {
        self.postcss
    }

    pub fn package_manager(&self) -> PackageManager {
        self.pm
    }

    /// True when TailwindCSS is selected.
    pub fn is_tailwind(&self) -> bool {
        self.postcss == Some(PostCss::Tailwind)
    }

    /// Script file name for `stem` under the selected module system.
    pub fn script_file(&self, stem: &str) -> String {
        format!("{stem}.{}", self.module.script_extension())
    }

    /// Render context exposing every option to a template.
    ///
    /// # Returns
    /// Object with `name`, `module`, `view`, `postcss` and `pm`; `view` and
    /// `postcss` are `null` when not selected
    pub fn context(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "module": self.module,
            "view": self.view,
            "postcss": self.postcss,
            "pm": self.pm,
        })
    }
}

impl TryFrom<RawOptions> for Options {
    type Error = Error;

    fn try_from(raw: RawOptions) -> Result<Self> {
        Options::new(
            raw.name,
            raw.module.parse()?,
            parse_view(&raw.view)?,
            parse_postcss(&raw.postcss)?,
            raw.pm.parse()?,
        )
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name={} module={} view={} postcss={} pm={}",
            self.name,
            self.module,
            self.view.map_or("none", ViewEngine::as_str),
            self.postcss.map_or("none", PostCss::as_str),
            self.pm
        )
    }
}

/// Derives a project name from the base name of `dir`, resolving relative
/// paths against the current directory first.
pub fn project_name_from_dir<P: AsRef<Path>>(dir: P) -> Result<String> {
    let dir = dir.as_ref();
    let absolute = std::path::absolute(dir).map_err(|e| Error::io(dir, e))?;
    let name = normalize(&absolute)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.trim().is_empty() {
        return Err(invalid("name", &dir.display().to_string()));
    }
    Ok(name)
}

/// Lexically resolves `.` and `..` components.
fn normalize(path: &Path) -> std::path::PathBuf {
    use std::path::Component;

    let mut out = std::path::PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
