use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use inheritance_portal::app::App;
use inheritance_portal::config::Config;
use inheritance_portal::logging;
use inheritance_portal::steps::{StepCatalog, StepsFile};
use inheritance_portal::ui::install_panic_hook;

#[derive(Parser)]
#[command(name = "inheritance-portal")]
#[command(about = "Progress stepper for the inheritance management portal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Step file (toml, yaml or json) to use instead of the built-in workflow
    #[arg(short, long)]
    steps_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the step catalog
    Steps {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configured step catalog
    Check,

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.steps_file {
        config.workflow.steps_file = Some(path);
    }

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Steps { json }) => {
            let catalog = config.step_catalog()?;
            cmd_steps(&catalog, json)?;
        }
        Some(Commands::Check) => {
            let catalog = config.step_catalog()?;
            println!("Step catalog OK: {} steps", catalog.len());
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
        }
        None => {
            let catalog = config.step_catalog()?;
            if let Some(path) = &logging_handle.log_file_path {
                tracing::info!(path = %path.display(), "Logging to file");
            }

            install_panic_hook();
            let mut app = App::new(config, catalog);
            app.run()?;
        }
    }

    Ok(())
}

fn cmd_steps(catalog: &StepCatalog, json: bool) -> Result<()> {
    if json {
        let file = StepsFile {
            steps: catalog.steps().to_vec(),
        };
        let out = serde_json::to_string_pretty(&file).context("Failed to serialize steps")?;
        println!("{out}");
        return Ok(());
    }

    for step in catalog.iter() {
        let marker = if step.final_step { " (final)" } else { "" };
        println!(
            "{} {}. {}{}",
            step.icon().glyph(),
            step.id + 1,
            step.title,
            marker
        );
        println!("     {}", step.description);
        if !step.required_docs.is_empty() {
            println!("     Documentos requeridos: {}", step.required_docs.join(", "));
        }
        if let Some(estimated) = &step.estimated_time {
            println!("     Tiempo estimado: {estimated}");
        }
        if let Some(location) = &step.location {
            println!("     Ubicación: {location}");
        }
    }
    Ok(())
}
