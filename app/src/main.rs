use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::{ContextCompat, Result};
use pyplot::Pyplot;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::run::View;

mod run;

const MODULES: &[&str] = &["common", "solve_time", "approximation_ratio", "pyplot"];

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Optional yaml config
    #[arg(short, long)]
    config_file: Option<String>,
    /// Benchmark results csv, overrides the config
    #[arg(short, long)]
    input: Option<PathBuf>,
    #[arg(short, long)]
    log: Vec<String>,
    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot the loaded results
    Plot {
        /// Views to render, in order
        #[arg(short, long, value_enum)]
        view: Vec<View>,
        /// Write pdfs to this folder instead of showing windows
        #[arg(long)]
        save: Option<PathBuf>,
        /// Write plot data as json to this folder
        #[arg(long)]
        dump: Option<PathBuf>,
    },
    /// List loaded results
    Ls,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let args = Cli::parse();

    let mut env_filter = EnvFilter::new(format!("solve_plot={log_level}"));

    if !args.log.is_empty() {
        for log in &args.log {
            env_filter = env_filter.add_directive(log.parse()?);
        }
    }

    for module in MODULES {
        if !args.log.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    let (file_layer, _guard) = match &args.log_file {
        Some(path) => {
            let file_name = path.file_name().context("Invalid log file")?;
            let dir = path.parent().unwrap_or(Path::new("."));
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(layer().with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(file_layer)
        .init();

    let mut config = run::read_config(args.config_file.as_deref()).await?;
    if let Some(input) = args.input {
        config.input = input;
    }

    let command = args.command.unwrap_or(Commands::Plot {
        view: Vec::new(),
        save: None,
        dump: None,
    });
    let result = match command {
        Commands::Plot { view, save, dump } => {
            run::run_plot(&config, &view, save, dump, &Pyplot).await
        }
        Commands::Ls => run::list_records(&config).await,
    };
    if let Err(err) = result {
        error!("{err:#?}");
        return Err(err);
    }

    Ok(())
}
