use common::{
    config::Settings,
    plot::{Figure, Plot, Scale, Series, node_counts},
    record::ProblemSolution,
};
use serde::{Deserialize, Serialize};

/// Solve time against problem size, log scaled
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SolveTime {}

#[typetag::serde]
impl Plot for SolveTime {
    fn name(&self) -> &'static str {
        "solve-time"
    }

    fn figure(&self, records: &[ProblemSolution], _settings: &Settings) -> Figure {
        let solution_times = records.iter().map(|r| r.solution_time).collect();
        Figure::new(
            "Solve time versus problem size",
            "Number of nodes",
            "Solve time (seconds)",
        )
        .with_y_scale(Scale::Log)
        .with_series(Series::markers(node_counts(records), solution_times))
    }
}

#[cfg(test)]
mod tests {
    use common::{config::Config, plot::SeriesStyle};

    use super::*;

    #[test]
    fn scatter_of_solve_times() {
        let records = vec![
            ProblemSolution::new("a", 20, 3.0, 5.0, 4.0),
            ProblemSolution::new("b", 10, 1.5, 4.0, 2.0),
        ];
        let figure = SolveTime {}.figure(&records, &Settings::default());

        assert_eq!(figure.title, "Solve time versus problem size");
        assert_eq!(figure.x_label, "Number of nodes");
        assert_eq!(figure.y_label, "Solve time (seconds)");
        assert_eq!(figure.y_scale, Scale::Log);
        assert!(figure.reference_lines.is_empty());
        assert_eq!(figure.series.len(), 1);
        assert_eq!(figure.series[0].style, SeriesStyle::Markers);
        assert_eq!(figure.series[0].x, vec![20.0, 10.0]);
        assert_eq!(figure.series[0].y, vec![3.0, 1.5]);
    }

    #[test]
    fn empty_records() {
        let figure = SolveTime {}.figure(&[], &Settings::default());
        assert!(figure.series[0].x.is_empty());
    }

    #[test]
    fn from_config() {
        let config: Config = serde_yml::from_str("plots:\n  - type: SolveTime\n").unwrap();
        let plots = config.plots.unwrap();
        assert_eq!(plots.len(), 1);
        assert_eq!(plots[0].name(), "solve-time");
    }
}
