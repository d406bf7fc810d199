//! Command routing and execution

use crate::basemap::ShapefileLoader;
use crate::cli::args::{Commands, InputArgs, OutputFormat};
use crate::config::{ConfigOverrides, PipelineConfig};
use crate::pipeline::{plan_path, BaseMapStatus, Pipeline, Plan};
use crate::sink::{GeoJsonExporter, LayerSink, SummarySink};
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

/// Config file picked up from the working directory when `-c` is not given
pub const DEFAULT_CONFIG_FILE: &str = "occurrence-layers.toml";

/// Execute a CLI command based on the parsed arguments
pub fn execute_command(command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Run {
            input,
            base_map,
            fill,
            base_map_policy,
            out,
        }) => {
            let overrides = ConfigOverrides {
                base_map,
                base_map_fill: fill,
                base_map_policy,
                ..input.overrides()
            };
            let config = load_config(&input, overrides)?;
            run_pipeline(config, out)
        }
        Some(Commands::Plan { input, format }) => {
            let config = load_config(&input, input.overrides())?;
            let plan = plan_path(
                config.records_path()?,
                &config.missing_sentinel,
                config.seed,
            )?;
            print!("{}", render_plan(&plan, format)?);
            Ok(())
        }
        None => {
            println!("{}", crate::cli::help::generate_help());
            Ok(())
        }
    }
}

fn config_file(input: &InputArgs) -> Option<PathBuf> {
    input.config.clone().or_else(|| {
        let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
        candidate.is_file().then_some(candidate)
    })
}

fn load_config(input: &InputArgs, overrides: ConfigOverrides) -> Result<PipelineConfig> {
    let file = config_file(input);
    if let Some(path) = &file {
        debug!("Using configuration file {}", path.display());
    }
    Ok(PipelineConfig::resolve(file.as_deref(), overrides)?)
}

fn run_pipeline(config: PipelineConfig, out: Option<PathBuf>) -> Result<()> {
    let pipeline = Pipeline::new(config, ShapefileLoader);
    let sink: Box<dyn LayerSink> = match out.as_deref() {
        Some(dir) => Box::new(GeoJsonExporter::new(dir)?),
        None => Box::new(SummarySink::stdout()),
    };
    let report = pipeline.run(sink)?;

    if let BaseMapStatus::Failed { reason } = &report.base_map {
        eprintln!("Warning: base map not loaded: {reason}");
    }
    if let Some(dir) = out.as_deref() {
        println!("Wrote {} layers to {}", report.layers.len(), dir.display());
    }
    Ok(())
}

/// Format a plan for the `plan` command.
pub fn render_plan(plan: &Plan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)? + "\n"),
        OutputFormat::Text => {
            let mut text = String::new();
            for layer in &plan.layers {
                text.push_str(&format!(
                    "{} ({} points)\n",
                    layer.layer_name(),
                    layer.group.len()
                ));
                for category in layer.plan.categories() {
                    text.push_str(&format!("  {} {}\n", category.color, category.label()));
                }
            }
            text.push_str(&format!(
                "{} rows read, {} accepted, {} missing, {} invalid\n",
                plan.stats.rows_read,
                plan.stats.accepted,
                plan.stats.missing,
                plan.stats.invalid.len()
            ));
            Ok(text)
        }
    }
}
