//! Project assembly: executes a plan against a target directory.

use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::filesystem::{ensure_dir, write_file};
use crate::options::Options;
use crate::planner::{plan, Stage, Step};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::store::TemplateStore;

/// Outcome of a successful generation.
#[derive(Debug, Default)]
pub struct Report {
    /// Every file written, in plan order.
    pub files: Vec<PathBuf>,
}

/// Renders templates from a store into a project directory.
pub struct Generator<R: TemplateRenderer = MiniJinjaRenderer> {
    store: TemplateStore,
    renderer: R,
}

impl Generator {
    /// Generator over the bundled templates and the MiniJinja renderer.
    pub fn bundled() -> Self {
        Self::new(TemplateStore::bundled(), MiniJinjaRenderer::new())
    }
}

impl<R: TemplateRenderer> Generator<R> {
    /// Creates a generator.
    ///
    /// # Arguments
    /// * `store` - Source of template assets
    /// * `renderer` - Engine evaluating template directives
    pub fn new(store: TemplateStore, renderer: R) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Generates a project for `options` into `target`.
    ///
    /// Existing files are overwritten. Stops at the first failing step and
    /// leaves whatever was already written in place.
    ///
    /// # Errors
    /// * `Error::Io` if the target directory cannot be created
    /// * `Error::Step` wrapping the first step failure
    pub async fn create<P: AsRef<Path>>(&self, target: P, options: &Options) -> Result<Report> {
        let target = target.as_ref();
        ensure_dir(target).await?;

        info!("Generating project into {} ({})", target.display(), options);
        let mut report = Report::default();
        for stage in plan(options).stages {
            debug!("Running {} stage", stage.kind);
            let written = self.run_stage(target, &stage).await.map_err(|(dest, source)| {
                Error::Step {
                    dest: target.join(dest),
                    options: Box::new(options.clone()),
                    source: Box::new(source),
                }
            })?;
            report.files.extend(written);
        }
        Ok(report)
    }

    async fn run_stage(
        &self,
        root: &Path,
        stage: &Stage,
    ) -> std::result::Result<Vec<PathBuf>, (PathBuf, Error)> {
        let (file_steps, dir_steps): (Vec<&Step>, Vec<&Step>) =
            stage.steps.iter().partition(|step| step.writes_file());

        let mut written = Vec::new();
        for step in dir_steps {
            written.extend(self.run_step(root, step).await?);
        }

        if stage.concurrent {
            let results =
                try_join_all(file_steps.into_iter().map(|step| self.run_step(root, step))).await?;
            written.extend(results.into_iter().flatten());
        } else {
            for step in file_steps {
                written.extend(self.run_step(root, step).await?);
            }
        }
        Ok(written)
    }

    /// Executes one step and returns the files it wrote.
    async fn run_step(
        &self,
        root: &Path,
        step: &Step,
    ) -> std::result::Result<Vec<PathBuf>, (PathBuf, Error)> {
        let dest = root.join(step.dest());
        let result = match step {
            Step::WriteManifest { manifest, .. } => match manifest.to_json() {
                Ok(contents) => write_file(&dest, &contents).await.map(|()| vec![dest.clone()]),
                Err(e) => Err(e),
            },
            Step::CopyTree { template, .. } => self.store.copy_tree(template, &dest).await,
            Step::EnsureDir { .. } => ensure_dir(&dest).await.map(|()| Vec::new()),
            Step::Render { template, context, .. } => {
                self.render(template, &dest, context).await.map(|()| vec![dest.clone()])
            }
        };
        result.map_err(|e| (step.dest().clone(), e))
    }

    /// Renders `template` fully in memory, then writes `dest` once.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the store has no such template
    /// * `Error::Render` if a directive fails, in which case `dest` is untouched
    /// * `Error::Io` if the template cannot be read or `dest` written
    pub async fn render(
        &self,
        template: &str,
        dest: &Path,
        context: &serde_json::Value,
    ) -> Result<()> {
        debug!("Rendering {} -> {}", template, dest.display());
        let source = self.store.read(template).await?;
        let content = self.renderer.render(template, &source, context)?;
        write_file(dest, &content).await
    }
}

/// Generates a project from the bundled templates.
///
/// # Errors
/// See [`Generator::create`].
pub async fn create<P: AsRef<Path>>(target: P, options: &Options) -> Result<Report> {
    Generator::bundled().create(target, options).await
}
