use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest weight accepted, alone or summed over one selection.
///
/// Scaled values sit at or below 100, so weighted scores stay finite.
pub const MAX_WEIGHT: f64 = 1e300;

/// Relative importance of one vector. Always finite, non-negative and at
/// most [`MAX_WEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=MAX_WEIGHT).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Weight as it arrives from a caller, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawWeight {
    Number(f64),
    Text(String),
}

impl RawWeight {
    fn to_weight(&self) -> Option<Weight> {
        match self {
            Self::Number(value) => Weight::new(*value),
            Self::Text(raw) => raw.trim().parse::<f64>().ok().and_then(Weight::new),
        }
    }
}

impl fmt::Display for RawWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(raw) => f.write_str(raw),
        }
    }
}

impl From<f64> for RawWeight {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawWeight {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawWeight {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Request-shape problems caught before any scoring happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("No vectors received")]
    NoVectors,
    #[error("You must pass the same quantity of vectors and weights.")]
    CountMismatch { vectors: usize, weights: usize },
    #[error(
        "weight '{raw}' for vector '{vector}' must be a non-negative number no larger than {:e}",
        MAX_WEIGHT
    )]
    InvalidWeight { vector: String, raw: String },
    #[error("combined weight {total:e} exceeds the supported maximum of {:e}", MAX_WEIGHT)]
    ExcessiveWeight { total: f64 },
    #[error("vector name at position {position} is blank")]
    BlankVector { position: usize },
}

/// One vector the caller wants scored and the weight it carries.
///
/// Repeating a vector is allowed; every occurrence contributes on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorSelection {
    pub vector: String,
    pub weight: Weight,
}

impl VectorSelection {
    pub fn new(vector: impl Into<String>, weight: Weight) -> Self {
        Self {
            vector: vector.into(),
            weight,
        }
    }

    /// Zips parallel `vector`/`weight` lists into selections, in order.
    pub fn pair<V, W>(vectors: &[V], weights: &[W]) -> Result<Vec<Self>, SelectionError>
    where
        V: AsRef<str>,
        W: Into<RawWeight> + Clone,
    {
        if vectors.is_empty() && weights.is_empty() {
            return Err(SelectionError::NoVectors);
        }

        if vectors.len() != weights.len() {
            return Err(SelectionError::CountMismatch {
                vectors: vectors.len(),
                weights: weights.len(),
            });
        }

        let selections = vectors
            .iter()
            .zip(weights.iter().cloned().map(Into::<RawWeight>::into))
            .enumerate()
            .map(|(position, (vector, raw))| {
                let vector = vector.as_ref().trim();
                if vector.is_empty() {
                    return Err(SelectionError::BlankVector { position });
                }

                let weight = raw
                    .to_weight()
                    .ok_or_else(|| SelectionError::InvalidWeight {
                        vector: vector.to_string(),
                        raw: raw.to_string(),
                    })?;

                Ok(Self::new(vector, weight))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total: f64 = selections.iter().map(|selection| selection.weight.value()).sum();
        if total > MAX_WEIGHT {
            return Err(SelectionError::ExcessiveWeight { total });
        }

        Ok(selections)
    }
}
