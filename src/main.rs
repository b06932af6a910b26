//! projforge's application entry point.
//! Handles argument parsing, builds the configuration and template catalog
//! once, and dispatches to the requested command.

use anyhow::bail;
use log::warn;
use projforge::{
    catalog::TemplateCatalog,
    cli::{get_args, Cli, Command, CreateArgs, TemplateCommand},
    config::{default_config_path, default_templates_dir, Config},
    forge::{describe_variable, CreateRequest, Forge},
    generator::GenerateOptions,
    git::init_repository,
    prompt::{DialoguerPrompter, Prompter},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn })
        .init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config_path = match args.config_path {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)?;

    if let Command::Config { init } = args.command {
        if init && !config_path.exists() {
            config.save(&config_path)?;
            println!("Wrote {}", config_path.display());
        }
        println!("Configuration: {}", config_path.display());
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let catalog = TemplateCatalog::new(default_templates_dir().ok());
    let forge = Forge::new(catalog, config);

    match args.command {
        Command::Create(create_args) => create(&forge, &create_args)?,
        Command::List { long } => println!("{}", forge.list_templates(long)?),
        Command::Preview { template } => println!("{}", forge.preview_template(&template)?),
        Command::Info { template } => info(&forge, &template)?,
        Command::Template(TemplateCommand::Add { path }) => {
            let installed = forge.add_template(&path)?;
            println!("Template added to {}", installed.display());
        }
        Command::Config { .. } => {}
    }
    Ok(())
}

fn create(forge: &Forge, args: &CreateArgs) -> anyhow::Result<()> {
    let (template, name) = args.template_and_name(&forge.config().default_template);
    let mut request = CreateRequest::new(template, name)
        .with_options(GenerateOptions { dry_run: args.dry_run, force: args.force });
    request.output_dir = args.output.clone();
    for (key, value) in &args.vars {
        request.variables.insert(key, value);
    }

    let dialoguer = DialoguerPrompter::new();
    let prompter: Option<&dyn Prompter> = if args.interactive { Some(&dialoguer) } else { None };

    let result = forge.create_project(&request, prompter)?;
    println!("{}", result.summary());
    if !result.success {
        bail!(
            "{} error(s) during generation, {} file(s) written",
            result.errors.len(),
            result.written.len()
        );
    }

    if !result.dry_run && (args.git || forge.config().auto_git) {
        match init_repository(&result.project_path) {
            Ok(()) => println!("  Git: Initialized"),
            Err(err) => {
                warn!("{err}");
                println!("  Git: Failed to initialize ({err})");
            }
        }
    }
    Ok(())
}

fn info(forge: &Forge, template: &str) -> anyhow::Result<()> {
    let info = forge.template_info(template)?;
    println!("Template: {} {}", info.name, info.origin);
    println!("Description: {}", info.description);
    println!("Version: {}", info.version);
    println!("Author: {}", info.author);
    println!("Files: {}", info.file_count);
    println!("Directories: {}", info.dir_count);
    println!("\nVariables:");
    for (key, def) in &info.variables {
        println!("  {key}: {}", describe_variable(def));
    }
    Ok(())
}
