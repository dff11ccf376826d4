use std::{io, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use rest_scaffold::generator::{
    generate, interactive, names::capitalize, registration_hint, ModuleWriter, Target,
    WriteOutcome,
};

#[derive(Debug, Parser)]
#[command(name = "generator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Code generator for REST CRUD route modules")]
struct Cli {
    /// Project root; files land in <root>/src/modules/<name>/
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Leave files that already exist untouched
    #[arg(long, global = true)]
    no_overwrite: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a complete module with model, service, controller, routes and validation
    Module { name: String },
    /// Generate only a model file
    Model { name: String },
    /// Generate only a service file
    Service { name: String },
    /// Generate only a controller file
    Controller { name: String },
    /// Prompt for what to generate
    Interactive,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cli = Cli::parse();
    let writer = ModuleWriter::new(&cli.root, !cli.no_overwrite)?;

    let (target, name) = match cli.command {
        Command::Module { name } => (Target::Module, name),
        Command::Model { name } => (Target::Model, name),
        Command::Service { name } => (Target::Service, name),
        Command::Controller { name } => (Target::Controller, name),
        Command::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            interactive::prompt(&mut input, &mut output).context("interactive prompt failed")?
        }
    };

    let (name, outcomes) = generate(&writer, target, &name)
        .with_context(|| format!("failed to generate {} {name:?}", target.as_str()))?;

    if target == Target::Module {
        println!("Generating module: {name}");
        println!("Module path: {}", writer.module_dir(&name).display());
    }
    for outcome in &outcomes {
        match outcome {
            WriteOutcome::Created(path) => println!("Created: {}", path.display()),
            WriteOutcome::Overwritten(path) => println!("Overwritten: {}", path.display()),
            WriteOutcome::Skipped(path) => println!("Skipped existing: {}", path.display()),
        }
    }

    match target {
        Target::Module => {
            println!("\nModule \"{name}\" generated successfully!");
            println!("\nNext steps:");
            println!("1. Register the module in src/modules/mod.rs:\n");
            println!("{}\n", registration_hint(&name));
            println!("2. Customize the route path in: src/modules/{name}/route.config.toml");
            println!("3. Update the record fields in: src/modules/{name}/{name}.model.rs");
            println!("4. Adjust payload rules in: src/modules/{name}/{name}.validation.rs");
        }
        other => {
            println!(
                "{} \"{name}\" generated successfully!",
                capitalize(other.as_str())
            );
        }
    }

    Ok(())
}
