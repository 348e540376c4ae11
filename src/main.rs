//! create-modern-express entry point.
//! Collects choices, confirms the target directory and runs the generator.

use create_modern_express::{
    cli::{banner, get_args, next_steps, Args},
    error::{default_error_handler, Error, Result},
    generator::Generator,
    options::{project_name_from_dir, Options},
    prompt::{collect_options, confirm_target, target_dir, DialoguerPrompter},
    renderer::MiniJinjaRenderer,
    store::TemplateStore,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Asks for the target directory and confirms writing into it
/// 2. Collects and validates the generation options
/// 3. Generates the project on a tokio runtime
/// 4. Prints the next steps
fn run(args: Args) -> Result<()> {
    println!("\n{}\n", banner());
    let prompt = DialoguerPrompter::new();

    let target = target_dir(&prompt, &args)?;
    confirm_target(&prompt, &target, args.force)?;

    let name = project_name_from_dir(&target)?;
    let options = Options::try_from(collect_options(&prompt, &args, name)?)?;

    let store = args.templates.clone().map(TemplateStore::new).unwrap_or_else(TemplateStore::bundled);
    let generator = Generator::new(store, MiniJinjaRenderer::new());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::io(&target, e))?;
    let report = runtime.block_on(generator.create(&target, &options))?;
    log::info!("Wrote {} files", report.files.len());

    println!("Your project is ready!");
    println!("\nNext steps:");
    let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
    for line in next_steps(&target, &cwd, options.package_manager()) {
        println!("{line}");
    }
    println!("\nTo close the dev server, hit Ctrl-C");
    Ok(())
}
