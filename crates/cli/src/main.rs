//! # admissions
//!
//! Command-line interface for the admissions regression service.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use data_facade::{prepare, PrepareConfig};
use registry_core::{FsModelStore, ModelStore, ModelTag};
use serde_json::{Map, Value};
use server::{ServerConfig, ServingModel};
use training::{train_and_register, ScalerKind, TrainConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "admissions")]
#[command(about = "Graduate admission chance regression: prepare, train, predict, serve", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the raw CSV and write the train/test split files
    Prepare {
        /// Raw admissions CSV
        #[arg(short, long, default_value = "data/raw/admission.csv")]
        input: PathBuf,

        /// Directory for X_train.csv, X_test.csv, y_train.csv, y_test.csv
        #[arg(short, long, default_value = "data/processed")]
        output: PathBuf,

        /// Target column
        #[arg(long, default_value = "Chance of Admit")]
        target: String,

        /// Fraction of rows held out for testing
        #[arg(long, default_value = "0.2")]
        test_ratio: f64,

        /// Shuffle seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Fit the pipeline on a prepared split and save it to the model store
    Train {
        /// Directory holding the split files
        #[arg(short, long, default_value = "data/processed")]
        data: PathBuf,

        /// Model store root
        #[arg(short, long, env = "MODEL_STORE_DIR", default_value = "models")]
        store: PathBuf,

        /// Name to save the model under
        #[arg(short, long, default_value = "admissions_lr")]
        name: String,

        /// Feature scaling before the regression
        #[arg(long, value_enum, default_value = "standard")]
        scaler: Scaler,
    },

    /// Score a CSV of feature rows with a stored model
    Predict {
        /// CSV with a header naming the model's features
        #[arg(short, long)]
        input: PathBuf,

        /// Model tag (name, name:latest or name:version)
        #[arg(short, long, env = "MODEL_TAG", default_value = "admissions_lr:latest")]
        model: String,

        /// Model store root
        #[arg(short, long, env = "MODEL_STORE_DIR", default_value = "models")]
        store: PathBuf,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List stored models and their versions
    Models {
        /// Model store root
        #[arg(short, long, env = "MODEL_STORE_DIR", default_value = "models")]
        store: PathBuf,

        /// Only this model
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Start the REST API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Model tag to serve (overrides MODEL_TAG)
        #[arg(short, long)]
        model: Option<String>,

        /// Model store root (overrides MODEL_STORE_DIR)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Scaler {
    Standard,
    Minmax,
    None,
}

impl From<Scaler> for ScalerKind {
    fn from(scaler: Scaler) -> Self {
        match scaler {
            Scaler::Standard => ScalerKind::Standard,
            Scaler::Minmax => ScalerKind::MinMax,
            Scaler::None => ScalerKind::None,
        }
    }
}

/// Run prepare command
fn run_prepare(
    input: PathBuf,
    output: PathBuf,
    target: String,
    test_ratio: f64,
    seed: u64,
) -> Result<()> {
    let config = PrepareConfig::builder()
        .target(&target)
        .test_ratio(test_ratio)
        .seed(seed)
        .build()?;
    let summary = prepare(&input, &output, &config)
        .with_context(|| format!("Failed to prepare {}", input.display()))?;

    println!(
        "Read {} rows, dropped {} incomplete",
        summary.rows_read, summary.rows_dropped
    );
    println!(
        "Train: {} rows, test: {} rows, {} features",
        summary.train_rows,
        summary.test_rows,
        summary.feature_names.len()
    );
    info!(out_dir = %output.display(), "split written");
    Ok(())
}

/// Run train command
fn run_train(data: PathBuf, store: PathBuf, name: String, scaler: Scaler) -> Result<()> {
    let store = FsModelStore::new(store);
    let config = TrainConfig::new(&name).with_scaler(scaler.into());
    let report = train_and_register(&data, &store, &config)
        .with_context(|| format!("Failed to train on {}", data.display()))?;

    info!(model = %report.tag, "saved model");
    println!("Features: {}", report.features.join(", "));
    println!(
        "Test metrics: R2 = {:.4}, MAE = {:.4}, RMSE = {:.4}",
        report.metrics.r2, report.metrics.mae, report.metrics.rmse
    );
    Ok(())
}

/// Read every CSV row as a record of raw cells keyed by header.
fn load_records(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.context("Failed to read row")?;
        let record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, cell)| (h.clone(), Value::String(cell.to_string())))
            .collect();
        records.push(record);
    }
    if records.is_empty() {
        bail!("{} has no data rows", path.display());
    }
    Ok(records)
}

/// Run predict command
fn run_predict(input: PathBuf, model: String, store: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let store = FsModelStore::new(store);
    let tag = ModelTag::parse(&model)?;
    let serving = ServingModel::load(&store, &tag)?;
    let records = load_records(&input)?;
    let predictions = serving.predict(&records)?;

    let json = serde_json::json!({
        "model": serving.tag().to_string(),
        "predictions": predictions,
    });

    if let Some(path) = output {
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(&mut file, &json)?;
        info!(path = %path.display(), rows = records.len(), "predictions written");
    } else {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}

/// Run models command
fn run_models(store: PathBuf, name: Option<String>) -> Result<()> {
    let store = FsModelStore::new(store);
    let names = match name {
        Some(name) => vec![name],
        None => store.names()?,
    };
    if names.is_empty() {
        println!("No models in {}", store.root().display());
        return Ok(());
    }

    for name in names {
        let latest = store.resolve(&ModelTag::latest(&name)?)?;
        println!("{}", name);
        for version in store.versions(&name)? {
            let marker = if Some(version.as_str()) == latest.version() {
                " (latest)"
            } else {
                ""
            };
            println!("  {}{}", version, marker);
        }
    }
    Ok(())
}

/// Run serve command
fn run_serve(
    port: Option<u16>,
    host: Option<String>,
    model: Option<String>,
    store: Option<PathBuf>,
) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(model) = model {
        config.model_tag = model;
    }
    if let Some(store) = store {
        config.model_store_dir = store;
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(server::run(config))?;
    Ok(())
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "admissions=info,data_core=info,training=info,registry_core=info,server=info,tower_http=info"
                    .into()
            }),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Prepare {
            input,
            output,
            target,
            test_ratio,
            seed,
        } => run_prepare(input, output, target, test_ratio, seed),

        Commands::Train {
            data,
            store,
            name,
            scaler,
        } => run_train(data, store, name, scaler),

        Commands::Predict {
            input,
            model,
            store,
            output,
        } => run_predict(input, model, store, output),

        Commands::Models { store, name } => run_models(store, name),

        Commands::Serve {
            port,
            host,
            model,
            store,
        } => run_serve(port, host, model, store),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
