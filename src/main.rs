use {
    anyhow::{Context, Result},
    burn::config::Config,
    clap::{Args, Parser, Subcommand},
    nn_pipeline::{
        sweep::SweepConfig, ModelType, PipelineConfig, PoolingStyle, BOLD, RESET,
    },
    std::{fs, path::PathBuf},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Show { source } => {
            let config = source.build()?;
            println!("{BOLD}config{RESET}");
            for (key, value) in config.entries() {
                println!("  {key:<20} {value}");
            }
        }
        Commands::Check { source } => {
            let config = source.build()?;
            config.validate()?;
            println!(
                "{BOLD}ok{RESET} - {} with {} layers, hidden size {}",
                config.model_type, config.num_layers, config.hidden_size
            );
        }
        Commands::Export { source, output } => {
            let config = source.build()?;
            config.validate()?;
            let path = match output {
                Some(path) => {
                    config
                        .save(&path)
                        .with_context(|| format!("failed to write {path:?}"))?;
                    path
                }
                None => config.save_to_model_dir()?,
            };
            println!("{BOLD}store config to: {path:?}{RESET}");
        }
        Commands::Sweep {
            source,
            model_types,
            learning_rates,
            hidden_sizes,
            batch_sizes,
            pooling_styles,
            output_dir,
        } => {
            let base = source.build()?;
            let defaults = SweepConfig::for_base(&base);
            let sweep = SweepConfig {
                model_types: or_default(model_types, defaults.model_types),
                learning_rates: or_default(learning_rates, defaults.learning_rates),
                hidden_sizes: or_default(hidden_sizes, defaults.hidden_sizes),
                batch_sizes: or_default(batch_sizes, defaults.batch_sizes),
                pooling_styles: or_default(pooling_styles, defaults.pooling_styles),
            };
            let runs = sweep.expand(&base)?;
            for run in &runs {
                run.config
                    .validate()
                    .with_context(|| format!("sweep run {}", run.name))?;
            }

            fs::create_dir_all(&output_dir)
                .with_context(|| format!("failed to create {output_dir:?}"))?;
            for run in &runs {
                let path = output_dir.join(format!("{}.json", run.name));
                run.config
                    .save(&path)
                    .with_context(|| format!("failed to write {path:?}"))?;
                log::info!("wrote {path:?}");
            }
            println!(
                "{BOLD}{} sweep configs written to: {output_dir:?}{RESET}",
                runs.len()
            );
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}

fn or_default<T>(values: Vec<T>, default: Vec<T>) -> Vec<T> {
    if values.is_empty() {
        default
    } else {
        values
    }
}

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where the table comes from and what is changed on top of it.
#[derive(Args)]
struct Source {
    /// JSON file to start from instead of the built-in table
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override a single entry, may be repeated
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    /// Pretrained model directory (falls back to NN_PIPELINE_PRETRAIN_MODEL_PATH)
    #[arg(short, long, value_name = "PATH")]
    pretrain_model_path: Option<PathBuf>,
}

impl Source {
    fn build(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::read_file(path)
                .with_context(|| format!("failed to load config from {path:?}"))?,
            None => PipelineConfig::new(),
        };
        for assignment in &self.set {
            config = config.with_assignment(assignment)?;
        }
        Ok(config.resolve_pretrain_model_path(self.pretrain_model_path))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print every entry of the table
    Show {
        #[command(flatten)]
        source: Source,
    },
    /// Validate the table
    Check {
        #[command(flatten)]
        source: Source,
    },
    /// Write the table as JSON (default: <model_path>/config.json)
    Export {
        #[command(flatten)]
        source: Source,
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Write one config per point of a hyperparameter grid
    Sweep {
        #[command(flatten)]
        source: Source,
        /// Model types to sweep; bert-family types need --pretrain-model-path
        /// and are left out of the default grid without one
        #[arg(short, long, value_delimiter = ',')]
        model_types: Vec<ModelType>,
        #[arg(short, long, value_delimiter = ',')]
        learning_rates: Vec<f64>,
        #[arg(long, value_delimiter = ',')]
        hidden_sizes: Vec<usize>,
        #[arg(short, long, value_delimiter = ',')]
        batch_sizes: Vec<usize>,
        #[arg(long, value_delimiter = ',')]
        pooling_styles: Vec<PoolingStyle>,
        #[arg(short, long, value_name = "DIR", default_value = "sweep")]
        output_dir: PathBuf,
    },
}
