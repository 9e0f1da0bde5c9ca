//! Externally loaded alignment parameters.
//!
//! Parameters come either from a JSON file, or from a directory in the
//! `score_matrix.csv` + `gapopen` + `gapextend` layout:
//!
//! ```text
//! A,C,G,T
//! 0,5,2,5
//! 5,0,5,2
//! 2,5,0,5
//! 5,2,5,0
//! ```
//!
//! In a directory, `gapopen` doubles as the linear per-symbol penalty.

use clap::ValueEnum;
use coopt_types::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON parameters: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: {msg}")]
    Malformed { path: PathBuf, msg: String },
    #[error(transparent)]
    Invalid(#[from] AlignError),
}

/// Which gap cost model to align with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapKind {
    #[default]
    Linear,
    Affine,
}

fn default_gap() -> Cost {
    5
}

/// Substitution costs plus the gap costs for both models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    #[serde(default)]
    pub score_matrix: ScoreMatrix,
    /// Per-symbol penalty of the linear model.
    #[serde(default = "default_gap")]
    pub linear_penalty: Cost,
    #[serde(default = "default_gap")]
    pub gap_open: Cost,
    #[serde(default = "default_gap")]
    pub gap_extend: Cost,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            score_matrix: ScoreMatrix::default(),
            linear_penalty: default_gap(),
            gap_open: default_gap(),
            gap_extend: default_gap(),
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })
}

fn malformed(path: &Path, msg: impl Into<String>) -> ConfigError {
    ConfigError::Malformed {
        path: path.to_owned(),
        msg: msg.into(),
    }
}

fn parse_cost(path: &Path, s: &str) -> Result<Cost, ConfigError> {
    s.trim()
        .parse()
        .map_err(|e| malformed(path, format!("{:?} is not an integer: {e}", s.trim())))
}

impl Parameters {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let params = Self::from_json_str(&read(path)?)?;
        log::debug!("loaded parameters from {}", path.display());
        Ok(params)
    }

    /// Read `score_matrix.csv`, `gapopen` and `gapextend` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let score_matrix = parse_score_matrix_csv(&dir.join("score_matrix.csv"))?;
        let open_path = dir.join("gapopen");
        let gap_open = parse_cost(&open_path, &read(&open_path)?)?;
        let extend_path = dir.join("gapextend");
        let gap_extend = parse_cost(&extend_path, &read(&extend_path)?)?;
        let params = Self {
            score_matrix,
            linear_penalty: gap_open,
            gap_open,
            gap_extend,
        };
        params.validate()?;
        log::debug!("loaded parameters from {}", dir.display());
        Ok(params)
    }

    /// Load from a JSON file or from a parameter directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_json_file(path)
        }
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        self.scoring(GapKind::Linear)?;
        self.scoring(GapKind::Affine)?;
        Ok(())
    }

    pub fn gap_model(&self, kind: GapKind) -> GapModel {
        match kind {
            GapKind::Linear => GapModel::Linear {
                penalty: self.linear_penalty,
            },
            GapKind::Affine => GapModel::Affine {
                open: self.gap_open,
                extend: self.gap_extend,
            },
        }
    }

    pub fn scoring(&self, kind: GapKind) -> Result<Scoring, AlignError> {
        Scoring::new(self.score_matrix, self.gap_model(kind))
    }
}

/// Parse a 4x4 substitution matrix with an `A,C,G,T` header line.
///
/// Header columns may come in any order (and any case); rows are taken in
/// the header's order.
pub fn parse_score_matrix_csv(path: &Path) -> Result<ScoreMatrix, ConfigError> {
    let text = read(path)?;
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let header = lines.next().ok_or_else(|| malformed(path, "empty file"))?;
    let order = header
        .split(',')
        .map(|h| {
            let h = h.trim().as_bytes();
            match h {
                [c] => rank(*c).ok_or_else(|| malformed(path, format!("bad header {header:?}"))),
                _ => Err(malformed(path, format!("bad header {header:?}"))),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    if order.len() != 4 || (0..4).any(|r| !order.contains(&r)) {
        return Err(malformed(path, format!("header must list A,C,G,T: {header:?}")));
    }

    let mut costs = [[0; 4]; 4];
    let mut rows = 0;
    for (row, line) in lines.enumerate() {
        if row >= 4 {
            return Err(malformed(path, "more than 4 rows"));
        }
        let values = line
            .split(',')
            .map(|v| parse_cost(path, v))
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != 4 {
            return Err(malformed(path, format!("row {} has {} columns", row + 1, values.len())));
        }
        for (col, v) in values.into_iter().enumerate() {
            costs[order[row] as usize][order[col] as usize] = v;
        }
        rows += 1;
    }
    if rows != 4 {
        return Err(malformed(path, format!("expected 4 rows, found {rows}")));
    }
    Ok(ScoreMatrix::new(costs)?)
}
