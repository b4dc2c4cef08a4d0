//! Applying user-supplied parameter text to a parameter store.
//!
//! The store itself accepts any value of the right kind. Range checks happen
//! here, against the declared descriptors, before anything is written.

use polyshaper_core::{ParamError, ParamStore, ParamValue};

/// Error type for command-line and preset parameter input.
#[derive(Debug, thiserror::Error)]
pub enum SettingError {
    #[error("Unknown parameter '{0}' (see `polyshaper params`)")]
    UnknownParameter(String),

    #[error("Invalid value for '{param}': '{value}' is not a valid {kind}")]
    InvalidValue {
        param: String,
        value: String,
        kind: &'static str,
    },

    #[error("Value for '{param}' out of range: {value} not in {range}")]
    OutOfRange {
        param: String,
        value: ParamValue,
        range: String,
    },

    #[error(transparent)]
    Param(#[from] ParamError),
}

/// Parse `value` for parameter `key`, check it against the declared range,
/// and write it.
pub fn apply_setting<P>(
    store: &ParamStore<P>,
    key: &str,
    value: &str,
) -> Result<ParamValue, SettingError> {
    let desc = store.descriptor(key).ok_or_else(|| {
        tracing::warn!(param = key, "rejected unknown parameter");
        SettingError::UnknownParameter(key.to_string())
    })?;

    let parsed = desc.parse_value(value).ok_or_else(|| {
        tracing::warn!(param = key, value, "rejected unparsable value");
        SettingError::InvalidValue {
            param: key.to_string(),
            value: value.to_string(),
            kind: desc.kind.name(),
        }
    })?;

    if !desc.contains(parsed) {
        tracing::warn!(param = key, %parsed, "rejected out-of-range value");
        return Err(SettingError::OutOfRange {
            param: key.to_string(),
            value: parsed,
            range: desc.range_text(),
        });
    }

    store.set(desc.name, parsed)?;
    Ok(parsed)
}

/// Apply `settings` in order, stopping at the first rejected entry.
pub fn apply_settings<'a, P, I>(store: &ParamStore<P>, settings: I) -> Result<(), SettingError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (key, value) in settings {
        apply_setting(store, key, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyshaper_effects::Waveshaper;

    #[test]
    fn test_applies_each_kind() {
        let shaper = Waveshaper::new();
        let params = shaper.params();
        apply_settings(
            params,
            [
                ("index", "2.5"),
                ("order", "4"),
                ("scalepowbase", "-3"),
                ("gain", "0.25"),
            ],
        )
        .unwrap();

        assert_eq!(params.get("index").unwrap(), ParamValue::Float(2.5));
        assert_eq!(params.get("order").unwrap(), ParamValue::UInt(4));
        assert_eq!(params.get("scalepowbase").unwrap(), ParamValue::Int(-3));
        assert_eq!(params.get("gain").unwrap(), ParamValue::Float(0.25));
    }

    #[test]
    fn test_unknown_parameter() {
        let shaper = Waveshaper::new();
        let err = apply_setting(shaper.params(), "drive", "1").unwrap_err();
        assert!(matches!(err, SettingError::UnknownParameter(ref p) if p == "drive"));
    }

    #[test]
    fn test_invalid_value_leaves_store() {
        let shaper = Waveshaper::new();
        let err = apply_setting(shaper.params(), "order", "-1").unwrap_err();
        assert!(matches!(err, SettingError::InvalidValue { kind: "uint", .. }));
        assert_eq!(shaper.params().get("order").unwrap(), ParamValue::UInt(1));
    }

    #[test]
    fn test_out_of_range() {
        let shaper = Waveshaper::new();
        let err = apply_setting(shaper.params(), "order", "11").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value for 'order' out of range: 11 not in [0, 10]"
        );
        assert!(apply_setting(shaper.params(), "index", "0").is_err());
        assert!(apply_setting(shaper.params(), "gain", "NaN").is_err());
    }

    #[test]
    fn test_stops_at_first_error() {
        let shaper = Waveshaper::new();
        let result = apply_settings(shaper.params(), [("order", "3"), ("gain", "2"), ("index", "5")]);
        assert!(result.is_err());
        assert_eq!(shaper.params().get("order").unwrap(), ParamValue::UInt(3));
        assert_eq!(shaper.params().get("index").unwrap(), ParamValue::Float(1.0));
    }
}
