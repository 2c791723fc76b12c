//! Normal Distribution Parameters

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::num::ParseFloatError;
use std::str::FromStr;
use thiserror::Error;

/// A normal distribution, described by its mean and standard deviation.
///
/// The default, `N(0, 1)`, leaves values unchanged when used for z-score
/// normalization.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DistributionRepr")]
pub struct Distribution {
    pub mean: f64,
    pub std_dev: f64,
}

impl Distribution {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Distribution { mean, std_dev }
    }

    /// How many standard deviations `value` lies from the mean
    pub fn z_score(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Distribution::new(0.0, 1.0)
    }
}

impl Display for Distribution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "N({}, {})", self.mean, self.std_dev)
    }
}

impl From<(f64, f64)> for Distribution {
    fn from((mean, std_dev): (f64, f64)) -> Self {
        Distribution::new(mean, std_dev)
    }
}

impl From<[f64; 2]> for Distribution {
    fn from([mean, std_dev]: [f64; 2]) -> Self {
        Distribution::new(mean, std_dev)
    }
}

impl From<[f32; 2]> for Distribution {
    fn from([mean, std_dev]: [f32; 2]) -> Self {
        Distribution::new(mean.into(), std_dev.into())
    }
}

impl TryFrom<&[f64]> for Distribution {
    type Error = DistributionParseError;

    fn try_from(input: &[f64]) -> Result<Self, Self::Error> {
        match *input {
            [mean, std_dev] => Ok(Distribution::new(mean, std_dev)),
            _ => Err(DistributionParseError::IncorrectLength {
                actual_length: input.len(),
            }),
        }
    }
}

/// Parses `"mean,std_dev"`, e.g. `"0.485, 0.229"`
impl FromStr for Distribution {
    type Err = DistributionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [mean, std_dev] = parts[..] else {
            return Err(DistributionParseError::IncorrectLength {
                actual_length: parts.len(),
            });
        };

        let parse = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|err| DistributionParseError::ParseFloat {
                    value: value.to_string(),
                    err,
                })
        };

        Ok(Distribution::new(parse(mean)?, parse(std_dev)?))
    }
}

/// Errors converting loose values into a [`Distribution`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionParseError {
    #[error("Unable to parse \"{value}\" as a number: {err}")]
    ParseFloat { value: String, err: ParseFloatError },
    #[error("Expected 2 values but found {actual_length}")]
    IncorrectLength { actual_length: usize },
}

/// Accepted configuration forms: `[mean, std_dev]` or `{ mean, std_dev }`
#[derive(Deserialize)]
#[serde(untagged)]
enum DistributionRepr {
    Pair(f64, f64),
    Fields {
        mean: f64,
        #[serde(alias = "stddev", alias = "standard_deviation")]
        std_dev: f64,
    },
}

impl From<DistributionRepr> for Distribution {
    fn from(repr: DistributionRepr) -> Self {
        match repr {
            DistributionRepr::Pair(mean, std_dev) => Distribution::new(mean, std_dev),
            DistributionRepr::Fields { mean, std_dev } => Distribution::new(mean, std_dev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_normal() {
        assert_eq!(Distribution::default(), Distribution::new(0.0, 1.0));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Distribution::new(5.0, 1.5), Distribution::from((5.0, 1.5)));
        assert_ne!(Distribution::new(5.0, 1.5), Distribution::new(5.0, 1.6));
    }

    #[test]
    fn test_z_score() {
        let distribution = Distribution::new(100.0, 15.0);
        let got = distribution.z_score(110.0);
        assert!((got - 0.666_666_666_666_666_6).abs() < 1e-12);
    }

    #[test]
    fn test_parse_from_string() {
        let got: Distribution = "1.75, 5".parse().unwrap();
        assert_eq!(got, Distribution::new(1.75, 5.0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1.0".parse::<Distribution>(),
            Err(DistributionParseError::IncorrectLength { actual_length: 1 })
        );
        assert!(matches!(
            "1.0,abc".parse::<Distribution>(),
            Err(DistributionParseError::ParseFloat { ref value, .. }) if value == "abc"
        ));
    }

    #[test]
    fn test_incorrect_slice_length() {
        let src: &[f64] = &[1.0, 2.0, 3.0];
        assert_eq!(
            Distribution::try_from(src),
            Err(DistributionParseError::IncorrectLength { actual_length: 3 })
        );
    }

    #[test]
    fn test_deserialize_forms() {
        let pair: Distribution = serde_json::from_str("[10.0, 2.5]").unwrap();
        let fields: Distribution =
            serde_json::from_str(r#"{"mean": 10.0, "std_dev": 2.5}"#).unwrap();
        let alias: Distribution = serde_json::from_str(r#"{"mean": 10, "stddev": 2.5}"#).unwrap();

        assert_eq!(pair, Distribution::new(10.0, 2.5));
        assert_eq!(fields, pair);
        assert_eq!(alias, pair);
    }

    #[test]
    fn test_display() {
        assert_eq!(Distribution::new(10.0, 0.75).to_string(), "N(10, 0.75)");
    }
}
