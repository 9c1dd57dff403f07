use core::fmt::Debug;
use std::{
    fs,
    path::{Path, PathBuf},
};

use dyn_clone::{DynClone, clone_trait_object};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{config::Settings, record::ProblemSolution};

#[derive(Debug, Default, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum SeriesStyle {
    /// Points only, no connecting line
    Markers,
    Line,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: SeriesStyle,
}

impl Series {
    pub fn markers(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            style: SeriesStyle::Markers,
        }
    }

    pub fn line(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            style: SeriesStyle::Line,
        }
    }
}

/// Backend independent description of a single chart
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_scale: Scale,
    pub series: Vec<Series>,
    /// Horizontal lines drawn across the whole chart
    pub reference_lines: Vec<f64>,
}

impl Figure {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_owned(),
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            y_scale: Scale::Linear,
            series: Vec::new(),
            reference_lines: Vec::new(),
        }
    }

    pub fn with_y_scale(mut self, scale: Scale) -> Self {
        self.y_scale = scale;
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_reference_line(mut self, y: f64) -> Self {
        self.reference_lines.push(y);
        self
    }
}

#[typetag::serde(tag = "type")]
pub trait Plot: Debug + DynClone + Send + Sync {
    /// Stable name, used for output file names
    fn name(&self) -> &'static str;
    /// Builds the chart for the loaded records
    ///
    /// Arguments:
    /// * `records` - Every loaded record, in file order
    /// * `settings` - The settings from the config yaml
    fn figure(&self, records: &[ProblemSolution], settings: &Settings) -> Figure;
}
clone_trait_object!(Plot);

#[derive(Debug, Default, PartialEq, Clone)]
pub enum RenderTarget {
    /// Open an interactive window and block until it is closed
    #[default]
    Show,
    /// Write `<dir>/<name>.pdf`
    Save(PathBuf),
}

pub trait Renderer {
    fn render(&self, name: &str, figure: &Figure, target: &RenderTarget) -> Result<()>;
}

/// Number of nodes for every record, in order
pub fn node_counts(records: &[ProblemSolution]) -> Vec<f64> {
    records.iter().map(|r| r.num_nodes as f64).collect()
}

pub fn dump_figure(dump_dir: &Path, name: &str, figure: &Figure) -> Result<PathBuf> {
    let plot_data_dir = dump_dir.join("plot_data");
    if !plot_data_dir.exists() {
        fs::create_dir_all(&plot_data_dir)?;
    }
    let data_path = plot_data_dir.join(format!("{name}.json"));
    fs::write(&data_path, serde_json::to_string(figure)?)
        .context(format!("Write plot data {data_path:?}"))?;
    Ok(data_path)
}

/// Renders each plot in turn, one window or file at a time
pub fn plot(
    plots: &[Box<dyn Plot>],
    records: &[ProblemSolution],
    settings: &Settings,
    renderer: &dyn Renderer,
    target: &RenderTarget,
    dump_dir: Option<&Path>,
) -> Result<()> {
    if plots.is_empty() {
        debug!("No plots");
        return Ok(());
    }

    for plot in plots {
        let name = plot.name();
        let figure = plot.figure(records, settings);
        if let Some(dir) = dump_dir {
            let path = dump_figure(dir, name, &figure)?;
            debug!("Wrote {name} plot data to {path:?}");
        }
        debug!("Rendering {name} with {} records", records.len());
        renderer
            .render(name, &figure, target)
            .context(format!("Render {name}"))?;
    }
    Ok(())
}
