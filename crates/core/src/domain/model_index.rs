//! Serde adapter for `finalThesis.selectedModelIndex`.
//!
//! The wire format uses `-1` for "no model selected"; in memory the index is
//! an `Option<usize>`. Generation responses sometimes carry the index as a
//! float, so any finite, non-negative, integral number is accepted and every
//! other value reads as unset.

use serde::{Deserialize, Deserializer, Serializer};

pub const UNSET: i64 = -1;

pub fn serialize<S>(index: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match index {
        Some(i) => serializer.serialize_i64(*i as i64),
        None => serializer.serialize_i64(UNSET),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.and_then(from_raw))
}

fn from_raw(raw: f64) -> Option<usize> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= u32::MAX as f64 {
        Some(raw as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(with = "crate::domain::model_index", default)]
        index: Option<usize>,
    }

    #[test]
    fn test_unset_serializes_as_minus_one() {
        let json = serde_json::to_string(&Holder { index: None }).unwrap();
        assert_eq!(json, r#"{"index":-1}"#);
    }

    #[test]
    fn test_accepts_integral_float() {
        let holder: Holder = serde_json::from_str(r#"{"index":2.0}"#).unwrap();
        assert_eq!(holder.index, Some(2));
    }

    #[test]
    fn test_negative_and_fractional_read_as_unset() {
        let negative: Holder = serde_json::from_str(r#"{"index":-1}"#).unwrap();
        let fractional: Holder = serde_json::from_str(r#"{"index":0.5}"#).unwrap();
        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert_eq!(negative.index, None);
        assert_eq!(fractional.index, None);
        assert_eq!(missing.index, None);
    }
}
