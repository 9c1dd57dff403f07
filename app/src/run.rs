use std::path::PathBuf;

use approximation_ratio::ApproximationRatio;
use clap::ValueEnum;
use common::{
    config::Config,
    load::load,
    plot::{Plot, RenderTarget, Renderer, plot},
    record::{ProblemSolution, summarize},
};
use eyre::{Context, Result};
use solve_time::SolveTime;
use tokio::fs::read_to_string;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    SolveTime,
    ApproximationRatio,
}

impl View {
    pub fn plot(self) -> Box<dyn Plot> {
        match self {
            View::SolveTime => Box::new(SolveTime {}),
            View::ApproximationRatio => Box::new(ApproximationRatio::default()),
        }
    }
}

pub async fn read_config(config_file: Option<&str>) -> Result<Config> {
    let Some(config_file) = config_file else {
        return Ok(Config::default());
    };
    let config: Config = serde_yml::from_str(
        &read_to_string(config_file)
            .await
            .context(format!("Read config {config_file}"))?,
    )
    .context(format!("Parse config {config_file}"))?;
    Ok(config)
}

/// Views from the command line win, then the config, then the solve time view alone
pub fn select_plots(config: &Config, views: &[View]) -> Vec<Box<dyn Plot>> {
    if !views.is_empty() {
        return views.iter().map(|v| v.plot()).collect();
    }
    match &config.plots {
        Some(plots) => plots.clone(),
        None => vec![View::SolveTime.plot()],
    }
}

async fn load_records(config: &Config) -> Result<Vec<ProblemSolution>> {
    let records = load(&config.input, &config.settings)
        .await
        .context(format!("Load {:?}", config.input))?;
    debug!("Loaded {} records from {:?}", records.len(), config.input);
    Ok(records)
}

pub async fn run_plot(
    config: &Config,
    views: &[View],
    save: Option<PathBuf>,
    dump: Option<PathBuf>,
    renderer: &dyn Renderer,
) -> Result<()> {
    let records = load_records(config).await?;
    let plots = select_plots(config, views);
    let target = save.map(RenderTarget::Save).unwrap_or_default();
    plot(
        &plots,
        &records,
        &config.settings,
        renderer,
        &target,
        dump.as_deref(),
    )
}

pub async fn list_records(config: &Config) -> Result<()> {
    let records = load_records(config).await?;
    for record in &records {
        println!(
            "{} -> nodes: {}, time: {}s, upper bound: {}, prize: {}, ratio: {:.4}",
            record.name,
            record.num_nodes,
            record.solution_time,
            record.upper_bound,
            record.prize,
            record.ratio()
        );
    }

    let summary = summarize(&records, config.settings.ratio_bound);
    match summary.max_ratio {
        Some(max_ratio) => println!(
            "{} records, {}..{} nodes, {:.3}s total, max ratio {max_ratio:.4}, {} over {}",
            summary.count,
            summary.min_nodes,
            summary.max_nodes,
            summary.total_solution_time,
            summary.over_bound,
            config.settings.ratio_bound
        ),
        None => println!("No accepted records in {:?}", config.input),
    }
    Ok(())
}
