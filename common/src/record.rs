/// Ratio ceiling guaranteed by the solver, a smidge over is tolerated
pub const DEFAULT_RATIO_BOUND: f64 = 2.0;

/// One accepted benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSolution {
    pub name: String,
    pub num_nodes: i64,
    /// Seconds taken to solve
    pub solution_time: f64,
    pub upper_bound: f64,
    pub prize: f64,
    ratio: f64,
}

impl ProblemSolution {
    pub fn new(
        name: impl Into<String>,
        num_nodes: i64,
        solution_time: f64,
        upper_bound: f64,
        prize: f64,
    ) -> Self {
        Self {
            name: name.into(),
            num_nodes,
            solution_time,
            upper_bound,
            prize,
            ratio: upper_bound / prize,
        }
    }

    /// `upper_bound / prize`
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn exceeds(&self, bound: f64) -> bool {
        self.ratio > bound
    }

    pub fn bound_warning(&self, bound: f64) -> Option<String> {
        self.exceeds(bound).then(|| {
            format!(
                "Problem {} has ratio {}, should be less than {bound} + epsilon",
                self.name, self.ratio
            )
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min_nodes: i64,
    pub max_nodes: i64,
    pub total_solution_time: f64,
    pub max_ratio: Option<f64>,
    pub over_bound: usize,
}

pub fn summarize(records: &[ProblemSolution], bound: f64) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }
    Summary {
        count: records.len(),
        min_nodes: records.iter().map(|r| r.num_nodes).min().unwrap_or_default(),
        max_nodes: records.iter().map(|r| r.num_nodes).max().unwrap_or_default(),
        total_solution_time: records.iter().map(|r| r.solution_time).sum(),
        max_ratio: records.iter().map(|r| r.ratio).reduce(f64::max),
        over_bound: records.iter().filter(|r| r.exceeds(bound)).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_upper_over_prize() {
        let record = ProblemSolution::new("probA", 10, 1.5, 3.0, 4.0);
        assert_eq!(record.ratio(), 3.0 / 4.0);
    }

    #[test]
    fn ratio_at_bound_does_not_warn() {
        let record = ProblemSolution::new("probA", 10, 1.5, 4.0, 2.0);
        assert_eq!(record.ratio(), 2.0);
        assert!(!record.exceeds(DEFAULT_RATIO_BOUND));
        assert_eq!(record.bound_warning(DEFAULT_RATIO_BOUND), None);
    }

    #[test]
    fn ratio_over_bound_warns_with_name_and_ratio() {
        let record = ProblemSolution::new("probX", 10, 1.5, 4.1, 2.0);
        assert_eq!(record.ratio(), 4.1 / 2.0);
        let warning = record.bound_warning(DEFAULT_RATIO_BOUND).unwrap();
        assert!(warning.contains("probX"));
        assert!(warning.contains("2.05"));
    }

    #[test]
    fn summary_of_records() {
        let records = vec![
            ProblemSolution::new("a", 30, 1.0, 4.0, 2.0),
            ProblemSolution::new("b", 10, 2.5, 5.0, 2.0),
            ProblemSolution::new("c", 20, 0.5, 1.0, 1.0),
        ];
        let summary = summarize(&records, DEFAULT_RATIO_BOUND);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min_nodes, 10);
        assert_eq!(summary.max_nodes, 30);
        assert_eq!(summary.total_solution_time, 4.0);
        assert_eq!(summary.max_ratio, Some(2.5));
        assert_eq!(summary.over_bound, 1);
    }

    #[test]
    fn summary_of_nothing() {
        assert_eq!(summarize(&[], DEFAULT_RATIO_BOUND), Summary::default());
    }
}
