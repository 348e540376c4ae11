//! create-modern-express generates Express starter projects.
//! A small set of choices (module system, view engine, CSS strategy, package
//! manager) selects and renders bundled template fragments into a ready to
//! run directory tree.

/// Command-line interface module for the generator
pub mod cli;

/// Error types and handling for the generator
pub mod error;

/// Async directory creation, file writing and tree copying
pub mod filesystem;

/// Project assembly from a generation plan
pub mod generator;

/// The generated `package.json`
pub mod manifest;

/// Validated generation options and their lookup tables
pub mod options;

/// Pure mapping from options to generation steps
pub mod planner;

/// User input and interaction handling
pub mod prompt;

/// Template rendering engine
pub mod renderer;

/// Bundled template assets
pub mod store;

pub use error::{Error, Result};
pub use filesystem::ensure_dir;
pub use generator::{create, Generator, Report};
pub use options::{ModuleSystem, Options, PackageManager, PostCss, RawOptions, ViewEngine};
pub use planner::plan;
pub use store::TemplateStore;
