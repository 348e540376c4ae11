use std::io;
use std::path::PathBuf;

use create_modern_express::error::Error;
use create_modern_express::options::{ModuleSystem, Options, PackageManager};

#[test]
fn test_io_error_carries_path() {
    let err = Error::io("/tmp/out/app.js", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));

    assert_eq!(err.to_string(), "IO error at '/tmp/out/app.js': denied.");
    match err {
        Error::Io { path, .. } => assert_eq!(path, PathBuf::from("/tmp/out/app.js")),
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::InvalidOption { field: "view", value: "jade".to_string() };
    assert_eq!(err.to_string(), "Invalid value 'jade' for option 'view'.");

    let err = Error::TemplateNotFound {
        name: "js/app.js".to_string(),
        path: PathBuf::from("/opt/templates/js/app.js"),
    };
    assert_eq!(
        err.to_string(),
        "Template 'js/app.js' does not exist at '/opt/templates/js/app.js'."
    );
}

#[test]
fn test_step_error_reports_destination_and_options() {
    let options =
        Options::new("demo", ModuleSystem::Cjs, None, None, PackageManager::Npm).unwrap();
    let err = Error::Step {
        dest: PathBuf::from("/tmp/demo/bin/www.cjs"),
        options: Box::new(options),
        source: Box::new(Error::Aborted("stop".to_string())),
    };

    let message = err.to_string();
    assert!(message.starts_with("Failed to generate '/tmp/demo/bin/www.cjs'"));
    assert!(message.contains("module=cjs"));
    assert!(matches!(err.root(), Error::Aborted(_)));
}

#[test]
fn test_manifest_serialization_error_is_reported() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = Error::from(source);

    assert!(matches!(err, Error::Manifest(_)));
    assert!(err.to_string().starts_with("Failed to serialize package manifest: "));
}
