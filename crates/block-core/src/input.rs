//! Numeric Input Coercion
//!
//! Every block that works on flat sequences goes through [`to_numeric_sequence`],
//! so the rules for which elements are accepted live in one place.

use crate::error::BlockError;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single element of loosely typed input, as handed over by a host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    Text(String),
    Null,
}

impl Element {
    /// Convert to `f64`, or `None` if the element is not numeric
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Element::Integer(v) => Some(v as f64),
            Element::Unsigned(v) => Some(v as f64),
            Element::Float(v) => Some(v),
            Element::Boolean(_) | Element::Text(_) | Element::Null => None,
        }
    }

    /// Human readable name of the element's kind
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Integer(_) | Element::Unsigned(_) => "integer",
            Element::Float(_) => "float",
            Element::Boolean(_) => "boolean",
            Element::Text(_) => "text",
            Element::Null => "null",
        }
    }
}

impl From<f64> for Element {
    fn from(v: f64) -> Self {
        Element::Float(v)
    }
}

impl From<i64> for Element {
    fn from(v: i64) -> Self {
        Element::Integer(v)
    }
}

impl From<&str> for Element {
    fn from(v: &str) -> Self {
        Element::Text(v.to_string())
    }
}

/// Input that can be coerced into a sequence of `f64`
pub trait NumericInput {
    /// Convert every element, failing on the first non-numeric one
    fn to_numeric(&self) -> Result<Vec<f64>, BlockError>;
}

impl NumericInput for [Element] {
    fn to_numeric(&self) -> Result<Vec<f64>, BlockError> {
        self.iter()
            .enumerate()
            .map(|(index, element)| {
                element.as_f64().ok_or(BlockError::InvalidInputType {
                    index,
                    found: element.kind(),
                })
            })
            .collect()
    }
}

impl NumericInput for [serde_json::Value] {
    fn to_numeric(&self) -> Result<Vec<f64>, BlockError> {
        use serde_json::Value;

        self.iter()
            .enumerate()
            .map(|(index, value)| {
                let found = match value {
                    Value::Number(n) => match n.as_i64() {
                        Some(v) => return Ok(v as f64),
                        None => match n.as_f64() {
                            Some(v) => return Ok(v),
                            None => "number",
                        },
                    },
                    Value::Bool(_) => "boolean",
                    Value::String(_) => "text",
                    Value::Null => "null",
                    Value::Array(_) => "array",
                    Value::Object(_) => "object",
                };
                Err(BlockError::InvalidInputType { index, found })
            })
            .collect()
    }
}

macro_rules! impl_numeric_input_for_primitives {
    ($($ty:ty),* $(,)?) => {
        $(
            impl NumericInput for [$ty] {
                fn to_numeric(&self) -> Result<Vec<f64>, BlockError> {
                    Ok(self.iter().map(|&v| v as f64).collect())
                }
            }
        )*
    };
}

impl_numeric_input_for_primitives!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64);

impl<T> NumericInput for Vec<T>
where
    [T]: NumericInput,
{
    fn to_numeric(&self) -> Result<Vec<f64>, BlockError> {
        self.as_slice().to_numeric()
    }
}

impl<T, const N: usize> NumericInput for [T; N]
where
    [T]: NumericInput,
{
    fn to_numeric(&self) -> Result<Vec<f64>, BlockError> {
        self.as_slice().to_numeric()
    }
}

/// Coerce arbitrary numeric input into a fresh sequence of `f64`
pub fn to_numeric_sequence<I>(input: &I) -> Result<Vec<f64>, BlockError>
where
    I: NumericInput + ?Sized,
{
    let sequence = input.to_numeric()?;
    trace!("Coerced {} elements to f64", sequence.len());
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_integers_and_floats() {
        let input = vec![Element::Integer(1), Element::Float(2.5), Element::Unsigned(7)];
        let got = to_numeric_sequence(&input).unwrap();
        assert_eq!(got, vec![1.0, 2.5, 7.0]);
    }

    #[test]
    fn test_empty_input() {
        let input: Vec<Element> = Vec::new();
        assert_eq!(to_numeric_sequence(&input).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_rejects_text_with_index() {
        let input = vec![Element::Float(1.0), Element::from("oops"), Element::from("again")];
        let err = to_numeric_sequence(&input).unwrap_err();
        assert_eq!(
            err,
            BlockError::InvalidInputType {
                index: 1,
                found: "text"
            }
        );
    }

    #[test]
    fn test_rejects_booleans() {
        let input = vec![Element::Boolean(true)];
        assert!(matches!(
            to_numeric_sequence(&input),
            Err(BlockError::InvalidInputType { index: 0, found: "boolean" })
        ));
    }

    #[test]
    fn test_large_integers_are_exact() {
        let big = 1_i64 << 53;
        let input = vec![Element::Integer(big), Element::Integer(-big)];
        let got = to_numeric_sequence(&input).unwrap();
        assert_eq!(got, vec![9_007_199_254_740_992.0, -9_007_199_254_740_992.0]);
    }

    #[test]
    fn test_deserialize_from_json() {
        let input: Vec<Element> = serde_json::from_str(r#"[0, 1.5, -3, "x", null]"#).unwrap();
        assert_eq!(
            input,
            vec![
                Element::Integer(0),
                Element::Float(1.5),
                Element::Integer(-3),
                Element::Text("x".to_string()),
                Element::Null,
            ]
        );
    }

    #[test]
    fn test_json_values() {
        let input: Vec<serde_json::Value> = serde_json::from_str("[1, 2.25, 3]").unwrap();
        assert_eq!(to_numeric_sequence(&input).unwrap(), vec![1.0, 2.25, 3.0]);

        let input: Vec<serde_json::Value> = serde_json::from_str(r#"[1, [2]]"#).unwrap();
        assert!(matches!(
            to_numeric_sequence(&input),
            Err(BlockError::InvalidInputType { index: 1, found: "array" })
        ));
    }

    #[test]
    fn test_primitive_slices() {
        assert_eq!(to_numeric_sequence(&[1_i16, -2, 3]).unwrap(), vec![1.0, -2.0, 3.0]);
        assert_eq!(to_numeric_sequence(&vec![0.5_f32]).unwrap(), vec![0.5]);
        assert_eq!(to_numeric_sequence(&[255_u8][..]).unwrap(), vec![255.0]);
    }
}
