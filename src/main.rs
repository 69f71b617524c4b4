//! Collager CLI - Layered Raster Compositing
//!
//! Runs command scripts, flattens saved projects, and lists the filter catalog.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use collager::prelude::*;
use env_logger::Env;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Collager - compose filtered raster layers into one image
#[derive(Parser, Debug)]
#[command(name = "collager")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a command script, or read commands from stdin
    Run {
        /// Script file
        script: Option<PathBuf>,
    },

    /// Flatten a saved project into an image file
    Flatten {
        /// Project file (.collage)
        project: PathBuf,

        /// Output image (.png, .jpg, .jpeg, anything else is PPM)
        output: PathBuf,

        /// Flatten only up to this layer
        #[arg(short, long)]
        layer: Option<String>,
    },

    /// Show canvas size and layers of a saved project
    Info {
        /// Project file (.collage)
        project: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available filters
    Filters {
        /// Only show filters whose name or description contains this text
        query: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    debug!("{} v{}", collager::NAME, collager::VERSION);

    match cli.command {
        Commands::Run { script } => run_script(script, config),
        Commands::Flatten {
            project,
            output,
            layer,
        } => flatten(&project, &output, layer.as_deref(), &config),
        Commands::Info { project, json } => project_info(&project, json),
        Commands::Filters { query, json } => list_filters(query.as_deref(), json),
    }
}

fn run_script(script: Option<PathBuf>, config: SessionConfig) -> Result<()> {
    let mut session = Session::with_config(io::stdout().lock(), config);

    match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            session.run(BufReader::new(file))?;
        }
        None => session.run(io::stdin().lock())?,
    }

    Ok(())
}

fn open_project(path: &Path) -> Result<Project> {
    let mut project = Project::new();
    load_project(path, &mut project)
        .with_context(|| format!("Failed to load project {}", path.display()))?;
    Ok(project)
}

fn flatten(
    project: &Path,
    output: &Path,
    layer: Option<&str>,
    config: &SessionConfig,
) -> Result<()> {
    let project = open_project(project)?;
    let image = match layer {
        Some(name) => project.image_at_layer(name)?,
        None => project.final_image()?,
    };

    save_image(output, &image, config.jpeg_quality)
        .with_context(|| format!("Failed to save {}", output.display()))?;
    println!(
        "Wrote {}x{} image to {}",
        image.width(),
        image.height(),
        output.display()
    );
    Ok(())
}

fn project_info(path: &Path, json: bool) -> Result<()> {
    let summary = open_project(path)?.summary()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Canvas: {}x{} (width x height)", summary.width, summary.height);
    println!("Layers (bottom to top):");
    for layer in &summary.layers {
        println!("  {:<24} {}", layer.name, layer.filter.name());
    }
    Ok(())
}

fn list_filters(query: Option<&str>, json: bool) -> Result<()> {
    let filters = match query {
        Some(query) => FilterName::search(query),
        None => FilterName::all().collect(),
    };

    if json {
        let infos: Vec<FilterInfo> = filters.iter().map(|filter| filter.info()).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if filters.is_empty() {
        println!("No filters match '{}'", query.unwrap_or_default());
        return Ok(());
    }

    for category in [FilterCategory::Single, FilterCategory::Dual] {
        let matching: Vec<_> = filters.iter().filter(|f| f.category() == category).collect();
        if matching.is_empty() {
            continue;
        }
        println!("{}:", category.display_name());
        for filter in matching {
            println!("  {:<24} {}", filter.name(), filter.description());
        }
        println!();
    }
    Ok(())
}
