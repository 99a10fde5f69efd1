use serde::{Deserialize, Serialize};

/// A derived `(key, value)` aggregate, e.g. a country and its species total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: f64,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl From<(&str, f64)> for KeyValue {
    fn from((key, value): (&str, f64)) -> Self {
        Self::new(key, value)
    }
}

/// Which end of a ranking to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extreme {
    Min,
    Max,
}

impl std::fmt::Display for Extreme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Extreme::Min => write!(f, "min"),
            Extreme::Max => write!(f, "max"),
        }
    }
}

impl std::str::FromStr for Extreme {
    type Err = crate::error::ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "min" | "minimum" | "least" => Ok(Extreme::Min),
            "max" | "maximum" | "most" => Ok(Extreme::Max),
            _ => Err(crate::error::ExplorerError::InvalidInput(format!(
                "Expected 'min' or 'max', got '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_from_tuple() {
        let kv = KeyValue::from(("Kenya", 12.5));
        assert_eq!(kv.key, "Kenya");
        assert_eq!(kv.value, 12.5);
    }

    #[test]
    fn test_extreme_display() {
        assert_eq!(Extreme::Min.to_string(), "min");
        assert_eq!(Extreme::Max.to_string(), "max");
    }

    #[test]
    fn test_extreme_parse_case_insensitive() {
        assert_eq!("MIN".parse::<Extreme>().unwrap(), Extreme::Min);
        assert_eq!("mIn".parse::<Extreme>().unwrap(), Extreme::Min);
        assert_eq!(" max ".parse::<Extreme>().unwrap(), Extreme::Max);
        assert_eq!("Maximum".parse::<Extreme>().unwrap(), Extreme::Max);
    }

    #[test]
    fn test_extreme_parse_invalid() {
        assert!("median".parse::<Extreme>().is_err());
        assert!("".parse::<Extreme>().is_err());
    }
}
