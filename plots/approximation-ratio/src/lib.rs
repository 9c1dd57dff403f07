use common::{
    config::Settings,
    plot::{Figure, Plot, Series, node_counts},
    record::ProblemSolution,
};
use serde::{Deserialize, Serialize};

/// Approximation ratio against problem size, with the guarantee drawn as a reference line
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ApproximationRatio {
    /// Reference line, the loader's ratio bound when unset
    #[serde(default)]
    pub bound: Option<f64>,
}

#[typetag::serde]
impl Plot for ApproximationRatio {
    fn name(&self) -> &'static str {
        "approximation-ratio"
    }

    fn figure(&self, records: &[ProblemSolution], settings: &Settings) -> Figure {
        let ratios = records.iter().map(|r| r.ratio()).collect();
        Figure::new(
            "Approximation ratio versus problem size",
            "Number of nodes",
            "Ratio (upper/lower)",
        )
        .with_series(Series::line(node_counts(records), ratios))
        .with_reference_line(self.bound.unwrap_or(settings.ratio_bound))
    }
}

#[cfg(test)]
mod tests {
    use common::{
        config::Config,
        plot::{Scale, SeriesStyle},
    };

    use super::*;

    #[test]
    fn line_of_ratios() {
        let records = vec![
            ProblemSolution::new("a", 10, 1.5, 4.0, 2.0),
            ProblemSolution::new("b", 30, 2.0, 3.0, 2.0),
            ProblemSolution::new("c", 20, 2.0, 4.1, 2.0),
        ];
        let figure = ApproximationRatio::default().figure(&records, &Settings::default());

        assert_eq!(figure.title, "Approximation ratio versus problem size");
        assert_eq!(figure.x_label, "Number of nodes");
        assert_eq!(figure.y_label, "Ratio (upper/lower)");
        assert_eq!(figure.y_scale, Scale::Linear);
        assert_eq!(figure.reference_lines, vec![2.0]);
        assert_eq!(figure.series[0].style, SeriesStyle::Line);
        assert_eq!(figure.series[0].x, vec![10.0, 30.0, 20.0]);
        assert_eq!(figure.series[0].y, vec![2.0, 1.5, 4.1 / 2.0]);
    }

    #[test]
    fn reference_line_follows_ratio_bound() {
        let settings = Settings {
            ratio_bound: 1.5,
            ..Default::default()
        };
        let figure = ApproximationRatio::default().figure(&[], &settings);
        assert_eq!(figure.reference_lines, vec![1.5]);

        let figure = ApproximationRatio { bound: Some(3.0) }.figure(&[], &settings);
        assert_eq!(figure.reference_lines, vec![3.0]);
    }

    #[test]
    fn from_config() {
        let yaml = "
settings:
  ratio_bound: 1.5
plots:
  - type: ApproximationRatio
  - type: ApproximationRatio
    bound: 2.5
";
        let config: Config = serde_yml::from_str(yaml).unwrap();
        let plots = config.plots.unwrap();
        let figures = plots
            .iter()
            .map(|p| p.figure(&[], &config.settings))
            .collect::<Vec<_>>();
        assert_eq!(plots[0].name(), "approximation-ratio");
        assert_eq!(figures[0].reference_lines, vec![1.5]);
        assert_eq!(figures[1].reference_lines, vec![2.5]);
        assert_eq!(config.input, std::path::PathBuf::from("solve_times.csv"));
    }
}
