use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::math::Scalar;

/// Central configuration for the matrix operations.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MatrixConfig {
    #[serde(default)]
    pub singularity: SingularityPolicy,
}

/// How `invert` decides that a determinant means "singular".
///
/// Deserialization rejects a negative or NaN tolerance, the same as `FromStr`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case", tag = "policy", try_from = "PolicyRepr")]
pub enum SingularityPolicy {
    /// Singular only when the determinant compares equal to zero.
    #[default]
    Exact,
    /// Singular when `|det| <= epsilon`.
    Tolerance { epsilon: f64 },
}

/// Unchecked wire form of [`SingularityPolicy`].
#[derive(Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy")]
enum PolicyRepr {
    Exact,
    Tolerance { epsilon: f64 },
}

impl TryFrom<PolicyRepr> for SingularityPolicy {
    type Error = String;

    fn try_from(repr: PolicyRepr) -> Result<Self, Self::Error> {
        match repr {
            PolicyRepr::Exact => Ok(SingularityPolicy::Exact),
            PolicyRepr::Tolerance { epsilon } => SingularityPolicy::tolerance(epsilon),
        }
    }
}

impl SingularityPolicy {
    pub const DEFAULT_EPSILON: f64 = 1e-12;

    /// Tolerance policy, rejecting a negative or NaN `epsilon`.
    pub fn tolerance(epsilon: f64) -> Result<Self, String> {
        if epsilon >= 0.0 {
            Ok(SingularityPolicy::Tolerance { epsilon })
        } else {
            Err(format!(
                "Invalid tolerance '{}': expected a non-negative number",
                epsilon
            ))
        }
    }

    /// An exactly-zero determinant is singular under every policy.
    pub fn is_singular<T: Scalar>(&self, det: T) -> bool {
        match *self {
            SingularityPolicy::Exact => det == T::zero(),
            SingularityPolicy::Tolerance { epsilon } => {
                det == T::zero() || det.abs() <= T::cast_f64(epsilon)
            }
        }
    }
}

impl FromStr for SingularityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.split_once(':') {
            None if lower == "exact" => Ok(SingularityPolicy::Exact),
            None if lower == "tolerance" => Ok(SingularityPolicy::Tolerance {
                epsilon: Self::DEFAULT_EPSILON,
            }),
            Some(("tolerance", eps)) => match eps.trim().parse::<f64>() {
                Ok(epsilon) => Self::tolerance(epsilon),
                Err(_) => Err(format!(
                    "Invalid tolerance '{}': expected a non-negative number",
                    eps
                )),
            },
            _ => Err(format!(
                "Unknown singularity policy: {}. Expected 'exact', 'tolerance' or 'tolerance:<epsilon>'",
                s
            )),
        }
    }
}

impl MatrixConfig {
    pub fn new(singularity: SingularityPolicy) -> Self {
        Self { singularity }
    }
}

/// Read a [`MatrixConfig`] from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MatrixConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: MatrixConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
