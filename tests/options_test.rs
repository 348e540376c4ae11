use create_modern_express::error::Error;
use create_modern_express::options::{
    ModuleSystem, Options, PackageManager, PostCss, RawOptions, ViewEngine,
};

fn raw(module: &str, view: &str, postcss: &str, pm: &str) -> RawOptions {
    RawOptions {
        name: "my-app".to_string(),
        module: module.to_string(),
        view: view.to_string(),
        postcss: postcss.to_string(),
        pm: pm.to_string(),
    }
}

#[test]
fn test_valid_raw_options() {
    let options = Options::try_from(raw("cjs", "ejs", "tw", "pnpm")).unwrap();

    assert_eq!(options.name(), "my-app");
    assert_eq!(options.module(), ModuleSystem::Cjs);
    assert_eq!(options.view(), Some(ViewEngine::Ejs));
    assert_eq!(options.postcss(), Some(PostCss::Tailwind));
    assert_eq!(options.package_manager(), PackageManager::Pnpm);
    assert!(options.is_tailwind());
}

#[test]
fn test_none_spellings() {
    let options = Options::try_from(raw("esm", "none", "", "npm")).unwrap();
    assert_eq!(options.view(), None);
    assert_eq!(options.postcss(), None);

    let options = Options::try_from(raw("ESM", "", "none", "Yarn")).unwrap();
    assert_eq!(options.module(), ModuleSystem::Esm);
    assert_eq!(options.package_manager(), PackageManager::Yarn);
}

#[test]
fn test_invalid_field_is_named() {
    let cases = [
        (raw("amd", "pug", "none", "npm"), "module"),
        (raw("esm", "jade", "none", "npm"), "view"),
        (raw("esm", "pug", "sass", "npm"), "postcss"),
        (raw("esm", "pug", "none", "bun"), "pm"),
    ];

    for (input, expected) in cases {
        match Options::try_from(input) {
            Err(Error::InvalidOption { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected InvalidOption for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_empty_name_rejected() {
    let mut input = raw("esm", "pug", "none", "npm");
    input.name = "   ".to_string();
    assert!(matches!(
        Options::try_from(input),
        Err(Error::InvalidOption { field: "name", .. })
    ));
}

#[test]
fn test_name_is_trimmed() {
    let options =
        Options::new("  app  ", ModuleSystem::Esm, None, None, PackageManager::Npm).unwrap();
    assert_eq!(options.name(), "app");
}

#[test]
fn test_lookup_tables() {
    assert_eq!(ModuleSystem::Esm.script_extension(), "js");
    assert_eq!(ModuleSystem::Cjs.script_extension(), "cjs");

    assert_eq!(ViewEngine::Pug.package(), ("pug", "^3.0.2"));
    assert_eq!(ViewEngine::Ejs.package(), ("ejs", "^3.1.9"));
    assert_eq!(ViewEngine::Hbs.package(), ("hbs", "^4.2.0"));

    for view in ViewEngine::ALL {
        assert_eq!(view.package().0, view.file_extension());
        assert_eq!(view.has_layout(), view != ViewEngine::Ejs);
    }

    assert_eq!(PackageManager::Pnpm.install_command(), "pnpm install");
    assert_eq!(PackageManager::Yarn.run_command("start"), "yarn run start");
}

#[test]
fn test_context_exposes_every_option() {
    let options = Options::new(
        "demo",
        ModuleSystem::Cjs,
        Some(ViewEngine::Hbs),
        None,
        PackageManager::Npm,
    )
    .unwrap();

    assert_eq!(
        options.context(),
        serde_json::json!({
            "name": "demo",
            "module": "cjs",
            "view": "hbs",
            "postcss": null,
            "pm": "npm",
        })
    );
}

#[test]
fn test_display_snapshot() {
    let options = Options::new(
        "demo",
        ModuleSystem::Esm,
        None,
        Some(PostCss::Plain),
        PackageManager::Yarn,
    )
    .unwrap();
    assert_eq!(options.to_string(), "name=demo module=esm view=none postcss=plain pm=yarn");
}
