use std::fs;

use common::plot::{Figure, RenderTarget, Renderer, Scale, SeriesStyle};
use eyre::{ContextCompat, Result};
use pyo3::{
    Bound, PyResult, Python,
    types::{PyAnyMethods, PyDict, PyDictMethods, PyModule},
};
use tracing::debug;

/// Draws figures through matplotlib in an embedded interpreter
#[derive(Debug, Default, Clone)]
pub struct Pyplot;

impl Renderer for Pyplot {
    fn render(&self, name: &str, figure: &Figure, target: &RenderTarget) -> Result<()> {
        match target {
            RenderTarget::Show => plot_python(|py, plt| {
                draw(py, &plt, figure)?;
                debug!("Showing {name}");
                plt.call_method0("show")?;
                Ok(())
            }),
            RenderTarget::Save(dir) => {
                if !dir.exists() {
                    fs::create_dir_all(dir)?;
                }
                let filepath = dir.join(format!("{name}.pdf"));
                let filepath = filepath
                    .to_str()
                    .context(format!("Invalid filepath for {name}: {filepath:?}"))?
                    .to_owned();
                plot_python(|py, plt| {
                    draw(py, &plt, figure)?;
                    debug!("Saving {name} to {filepath}");
                    plt.call_method1("savefig", (filepath.as_str(),))?;
                    plt.call_method0("close")?;
                    Ok(())
                })
            }
        }
    }
}

pub fn plot_python<Func>(func: Func) -> Result<()>
where
    Func: for<'py> FnOnce(Python<'py>, Bound<'py, PyModule>) -> PyResult<()>,
{
    let result: PyResult<()> = Python::with_gil(|py| {
        let plt = py.import("matplotlib.pyplot")?;
        func(py, plt)
    });
    result?;
    Ok(())
}

fn draw<'py>(py: Python<'py>, plt: &Bound<'py, PyModule>, figure: &Figure) -> PyResult<()> {
    plt.call_method0("figure")?;

    let plot_fn = match figure.y_scale {
        Scale::Log => "semilogy",
        Scale::Linear => "plot",
    };
    for series in &figure.series {
        let kwargs = PyDict::new(py);
        if series.style == SeriesStyle::Markers {
            kwargs.set_item("marker", ".")?;
            kwargs.set_item("linestyle", "")?;
        }
        plt.call_method(
            plot_fn,
            (series.x.clone(), series.y.clone()),
            Some(&kwargs),
        )?;
    }
    for y in &figure.reference_lines {
        plt.call_method1("axhline", (*y,))?;
    }

    plt.call_method1("xlabel", (figure.x_label.as_str(),))?;
    plt.call_method1("ylabel", (figure.y_label.as_str(),))?;
    plt.call_method1("title", (figure.title.as_str(),))?;
    Ok(())
}
