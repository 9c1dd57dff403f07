use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    load::{DEFAULT_INPUT, Schema},
    plot::Plot,
    record::DEFAULT_RATIO_BOUND,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default)]
    pub settings: Settings,
    pub plots: Option<Vec<Box<dyn Plot>>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            settings: Settings::default(),
            plots: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub schema: Schema,
    /// Ratios above this are reported when loading
    #[serde(default = "default_ratio_bound")]
    pub ratio_bound: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            ratio_bound: DEFAULT_RATIO_BOUND,
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_ratio_bound() -> f64 {
    DEFAULT_RATIO_BOUND
}
