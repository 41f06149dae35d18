use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Recommendation list and job detail view.
pub const RECOMMENDATION_WEIGHTS: Weights = Weights {
    skill: 0.65,
    location: 0.20,
    recency: 0.15,
};

/// Rescoring after a resume upload: location counts a little more.
pub const RESUME_WEIGHTS: Weights = Weights {
    skill: 0.60,
    location: 0.25,
    recency: 0.15,
};

pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    #[error("{component} weight must be finite")]
    NonFinite { component: &'static str },
    #[error("{component} weight must not be negative (got {value})")]
    Negative { component: &'static str, value: f64 },
    #[error("weights must sum to 1.0 (got {0})")]
    BadSum(f64),
    #[error("expected three comma separated weights: {0}")]
    Parse(String),
}

/// Weight triple for the aggregator. Only constructible through validation,
/// so every value in circulation sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    skill: f64,
    location: f64,
    recency: f64,
}

impl Weights {
    pub fn new(skill: f64, location: f64, recency: f64) -> Result<Self, WeightsError> {
        for (component, value) in [("skill", skill), ("location", location), ("recency", recency)]
        {
            if !value.is_finite() {
                return Err(WeightsError::NonFinite { component });
            }
            if value < 0.0 {
                return Err(WeightsError::Negative { component, value });
            }
        }

        let weights = Self {
            skill,
            location,
            recency,
        };
        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::BadSum(sum));
        }

        Ok(weights)
    }

    pub fn skill(&self) -> f64 {
        self.skill
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn recency(&self) -> f64 {
        self.recency
    }

    pub fn sum(&self) -> f64 {
        self.skill + self.location + self.recency
    }
}

impl FromStr for Weights {
    type Err = WeightsError;

    /// Parses `"skill,location,recency"`, e.g. `"0.65,0.20,0.15"`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts = raw
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| WeightsError::Parse(format!("{raw:?}: {err}")))?;

        match parts.as_slice() {
            [skill, location, recency] => Weights::new(*skill, *location, *recency),
            _ => Err(WeightsError::Parse(format!(
                "{raw:?} has {} values",
                parts.len()
            ))),
        }
    }
}
