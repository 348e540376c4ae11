//! Maps validated options to the ordered list of generation steps.
//!
//! Planning is pure: it touches neither the file system nor the template
//! store, so every option combination can be inspected without writing
//! anything. All destinations are relative to the project root.

use std::fmt;
use std::path::PathBuf;

use serde_json::json;

use crate::manifest::Manifest;
use crate::options::{Options, ViewEngine};

/// Logical name of the option-independent skeleton directory.
pub const BASE_TEMPLATE: &str = "base";

/// Directories every project gets, created after the skeleton copy.
pub const BASE_DIRECTORIES: [&str; 5] = ["bin", "public/images", "public/css", "public/js", "routes"];

/// Script templates and their destinations, without extension.
const SCRIPTS: [(&str, &str); 3] = [
    ("js/app", "app"),
    ("js/index", "routes/index"),
    ("js/www", "bin/www"),
];

const VIEW_FILES: [&str; 3] = ["layout", "index", "error"];

/// One unit of work for the assembler.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Serialize and write the package manifest.
    WriteManifest { dest: PathBuf, manifest: Manifest },
    /// Copy a template directory verbatim.
    CopyTree { template: String, dest: PathBuf },
    /// Idempotently create a directory.
    EnsureDir { dest: PathBuf },
    /// Render one template against its own context.
    Render { template: String, dest: PathBuf, context: serde_json::Value },
}

impl Step {
    fn render<T: Into<String>, D: Into<PathBuf>>(
        template: T,
        dest: D,
        context: serde_json::Value,
    ) -> Self {
        Step::Render { template: template.into(), dest: dest.into(), context }
    }

    fn ensure_dir<D: Into<PathBuf>>(dest: D) -> Self {
        Step::EnsureDir { dest: dest.into() }
    }

    /// Destination relative to the project root.
    pub fn dest(&self) -> &PathBuf {
        match self {
            Step::WriteManifest { dest, .. }
            | Step::CopyTree { dest, .. }
            | Step::EnsureDir { dest }
            | Step::Render { dest, .. } => dest,
        }
    }

    /// True for steps that produce exactly one file at `dest`.
    pub fn writes_file(&self) -> bool {
        matches!(self, Step::WriteManifest { .. } | Step::Render { .. })
    }
}

/// Concern a group of steps belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Manifest,
    Base,
    Css,
    Scripts,
    Views,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Manifest => "manifest",
            StageKind::Base => "base",
            StageKind::Css => "css",
            StageKind::Scripts => "scripts",
            StageKind::Views => "views",
        };
        f.write_str(name)
    }
}

/// An ordered group of steps. Directory steps run first, in order. The file
/// steps that follow write disjoint paths; when `concurrent` is set they may
/// run in any order, otherwise they run in sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub kind: StageKind,
    pub concurrent: bool,
    pub steps: Vec<Step>,
}

impl Stage {
    fn sequential(kind: StageKind, steps: Vec<Step>) -> Self {
        Self { kind, concurrent: false, steps }
    }

    fn concurrent(kind: StageKind, steps: Vec<Step>) -> Self {
        Self { kind, concurrent: true, steps }
    }
}

/// Every stage needed to generate one project, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub stages: Vec<Stage>,
}

impl Plan {
    /// Every step of every stage, in execution order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.stages.iter().flat_map(|stage| stage.steps.iter())
    }

    /// Destinations of the steps that write a single file, in plan order.
    pub fn destinations(&self) -> Vec<&PathBuf> {
        self.steps().filter(|step| step.writes_file()).map(Step::dest).collect()
    }

    /// Directories the plan creates explicitly.
    pub fn directories(&self) -> Vec<&PathBuf> {
        self.steps()
            .filter(|step| matches!(step, Step::EnsureDir { .. }))
            .map(Step::dest)
            .collect()
    }

    /// Returns the stage of the given kind.
    ///
    /// # Arguments
    /// * `kind` - Stage to look up
    ///
    /// # Returns
    /// `None` if the plan has no such stage
    pub fn stage(&self, kind: StageKind) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.kind == kind)
    }
}

/// Builds the generation plan for `options`.
///
/// Stages run in the order manifest, base, css, scripts, views. No two steps
/// share a destination.
///
/// # Arguments
/// * `options` - Validated choices the plan is built from
///
/// # Returns
/// The plan, ready to be executed by a `Generator`
pub fn plan(options: &Options) -> Plan {
    Plan {
        stages: vec![
            manifest_stage(options),
            base_stage(),
            css_stage(options),
            scripts_stage(options),
            views_stage(options),
        ],
    }
}

fn manifest_stage(options: &Options) -> Stage {
    let step = Step::WriteManifest {
        dest: PathBuf::from("package.json"),
        manifest: Manifest::new(options),
    };
    Stage::sequential(StageKind::Manifest, vec![step])
}

fn base_stage() -> Stage {
    let mut steps =
        vec![Step::CopyTree { template: BASE_TEMPLATE.to_string(), dest: PathBuf::new() }];
    steps.extend(BASE_DIRECTORIES.into_iter().map(Step::ensure_dir));
    Stage::sequential(StageKind::Base, steps)
}

fn css_stage(options: &Options) -> Stage {
    let css_context = json!({ "tailwind": options.is_tailwind() });

    let mut steps = vec![Step::render("css/style.css", "public/css/style.css", css_context.clone())];
    if options.postcss().is_some() {
        steps.push(Step::render("css/.postcssrc.yaml", ".postcssrc.yaml", css_context));
    }
    if options.is_tailwind() {
        let config = options.script_file("tailwind.config");
        steps.push(Step::render(format!("css/{config}"), config, options.context()));
    }
    Stage::concurrent(StageKind::Css, steps)
}

fn scripts_stage(options: &Options) -> Stage {
    let steps = SCRIPTS
        .into_iter()
        .map(|(template, dest)| {
            Step::render(options.script_file(template), options.script_file(dest), options.context())
        })
        .collect();
    Stage::concurrent(StageKind::Scripts, steps)
}

fn views_stage(options: &Options) -> Stage {
    let Some(view) = options.view() else {
        let step = Step::render("views/index.html", "public/index.html", options.context());
        return Stage::concurrent(StageKind::Views, vec![step]);
    };

    let mut steps = vec![Step::ensure_dir("views")];
    steps.extend(view_files(view).map(|file| {
        let file = format!("views/{file}.{}", view.file_extension());
        Step::render(file.clone(), file, options.context())
    }));
    Stage::concurrent(StageKind::Views, steps)
}

/// View files rendered for `view`; EJS has no layout file.
pub fn view_files(view: ViewEngine) -> impl Iterator<Item = &'static str> {
    VIEW_FILES.into_iter().filter(move |file| *file != "layout" || view.has_layout())
}
