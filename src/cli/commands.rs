use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::codify::{use_declarations, Generator};
use crate::config::{ErrorPolicy, GeneratorConfig};
use crate::manifest;
use crate::program::{codify_manifests, generate_program, ProgramObject};
use crate::registry::Registry;

/// Command-line interface for kodify
#[derive(Parser)]
#[command(name = "kodify")]
#[command(about = "Turn Kubernetes manifests into Rust construction code", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a Rust module that installs and uninstalls every object in a manifest
    Generate {
        /// Manifest file (YAML or JSON, multiple documents allowed)
        #[arg(short, long)]
        file: PathBuf,

        /// Generator configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the generated struct, converted to CamelCase
        #[arg(short, long, default_value = "cluster")]
        name: String,

        /// Fail on the first encoding or template problem
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Print install (and optionally uninstall) snippets for each object
    Snippets {
        /// Manifest file (YAML or JSON, multiple documents allowed)
        #[arg(short, long)]
        file: PathBuf,

        /// Generator configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Also print uninstall snippets
        #[arg(long, default_value_t = false)]
        uninstall: bool,

        /// Fail on the first encoding or template problem
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

/// Parse the process arguments and run, writing to stdout.
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}

/// Run `cli`, writing generated source to `out` unless an output file is
/// given.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Generate {
            file,
            config,
            output,
            name,
            strict,
        } => {
            let generator = build_generator(config.as_deref(), *strict)?;
            let manifests = manifest::load(file)?;
            let program = generate_program(
                &generator,
                name,
                &file.display().to_string(),
                manifests,
            )?;
            report_diagnostics(&program.objects);

            match output {
                Some(path) => {
                    std::fs::write(path, &program.source)?;
                    info!(path = %path.display(), objects = program.objects.len(), "wrote program");
                }
                None => out.write_all(program.source.as_bytes())?,
            }
        }
        Commands::Snippets {
            file,
            config,
            uninstall,
            strict,
        } => {
            let generator = build_generator(config.as_deref(), *strict)?;
            let manifests = manifest::load(file)?;
            let mut registry = Registry::new();
            let objects = codify_manifests(&generator, manifests, &mut registry, None)?;
            report_diagnostics(&objects);
            write_snippets(&generator, &objects, *uninstall, out)?;
        }
    }
    Ok(())
}

fn build_generator(
    config: Option<&Path>,
    strict: bool,
) -> Result<Generator, Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => GeneratorConfig::load(path)?.with_env_overrides(),
        None => GeneratorConfig::from_env(),
    };
    if strict {
        config.encode_errors = ErrorPolicy::Fail;
        config.template_errors = ErrorPolicy::Fail;
    }
    Ok(Generator::new(config)?)
}

fn report_diagnostics(objects: &[ProgramObject]) {
    for object in objects {
        for diagnostic in object
            .install
            .diagnostics
            .iter()
            .chain(&object.uninstall.diagnostics)
        {
            warn!(kind = object.kind, name = %object.name, "{diagnostic}");
        }
    }
}

fn write_snippets(
    generator: &Generator,
    objects: &[ProgramObject],
    uninstall: bool,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let packages: BTreeSet<String> = objects
        .iter()
        .flat_map(|o| o.install.packages.iter().cloned())
        .collect();
    for line in use_declarations(&packages, &generator.config().aliases) {
        writeln!(out, "{line}")?;
    }
    for object in objects {
        writeln!(out)?;
        writeln!(out, "// install {} {}", object.kind, object.name)?;
        out.write_all(object.install.text.as_bytes())?;
        if uninstall {
            writeln!(out)?;
            writeln!(out, "// uninstall {} {}", object.kind, object.name)?;
            out.write_all(object.uninstall.text.as_bytes())?;
        }
    }
    Ok(())
}
