use std::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::sweep::Snapshot;

#[derive(Error, Debug)]
pub enum ParamError {
    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse sweep parameters")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize, Debug)]
pub struct SweepParamParser {
    pub ny: f64,
    pub ratios: Vec<f64>,
    pub mach_numbers: Vec<f64>,
    pub epsilon_k: f64,
    pub gamma: f64,
    pub cells: usize,
    #[serde(default = "default_shock_fraction")]
    pub shock_fraction: f64,
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    pub snapshot: Snapshot,
}
fn default_shock_fraction() -> f64 {
    2.0 / 3.0
}
fn default_normalize() -> bool {
    true
}
impl SweepParamParser {
    pub fn parse(file_path: &str) -> Result<Self, ParamError> {
        let file_content = fs::read_to_string(file_path).map_err(|source| ParamError::Read {
            path: file_path.to_string(),
            source,
        })?;
        Self::parse_str(&file_content)
    }
    pub fn parse_str(content: &str) -> Result<Self, ParamError> {
        let param: SweepParamParser = serde_json::from_str(content)?;
        Ok(param)
    }
}
