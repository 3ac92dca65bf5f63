use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateLength, ValidationErrors};

/// Represents optional field semantics in PATCH/UPDATE requests.
///
/// - `Unchanged` → field not touched
/// - `SetToNull` → explicitly null
/// - `SetToValue` → set to provided value
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum OptionField<T> {
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<T> Default for OptionField<T> {
    fn default() -> Self {
        OptionField::Unchanged
    }
}

/// A present-but-null JSON value maps to `SetToNull`, a present value to
/// `SetToValue`. Absent fields never reach this impl; `#[serde(default)]`
/// on the containing struct leaves them `Unchanged`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionField<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            None => OptionField::SetToNull,
            Some(value) => OptionField::SetToValue(value),
        })
    }
}

// ---------------------- Validation support ----------------------

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }
    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

impl<T: Validate> Validate for OptionField<T> {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            OptionField::SetToValue(value) => value.validate(),
            _ => Ok(()),
        }
    }
}

// ---------------------- Core helpers & conversions ----------------------

impl<T> OptionField<T> {
    /// Convert to nested option:
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(T))` → set to value
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    /// Borrowed nested option.
    pub fn as_ref_option(&self) -> Option<Option<&T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(value) => Some(Some(value)),
        }
    }

    /// Transform inner value if `SetToValue`
    pub fn map_value<U, F: FnOnce(T) -> U>(self, f: F) -> OptionField<U> {
        match self {
            Self::Unchanged => OptionField::Unchanged,
            Self::SetToNull => OptionField::SetToNull,
            Self::SetToValue(v) => OptionField::SetToValue(f(v)),
        }
    }

    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// True when `SetToNull`.
    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }

    /// If `SetToValue`, returns a reference to inner value.
    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Collapse into `Option<T>`, dropping the null/unchanged distinction.
    pub fn flatten(self) -> Option<T> {
        match self {
            OptionField::SetToValue(v) => Some(v),
            _ => None
        }
    }

    /// Borrowed flatten for references
    pub fn flatten_ref(&self) -> Option<&T> {
        match self {
            OptionField::SetToValue(v) => Some(v),
            _ => None
        }
    }
}

impl<T> From<Option<Option<T>>> for OptionField<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => OptionField::Unchanged,
            Some(None) => OptionField::SetToNull,
            Some(Some(v)) => OptionField::SetToValue(v),
        }
    }
}

impl<T> From<OptionField<T>> for Option<Option<T>> {
    fn from(of: OptionField<T>) -> Self {
        of.into_option()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Patch {
        name: OptionField<String>,
        count: OptionField<i32>,
    }

    #[test]
    fn missing_field_deserializes_as_unchanged() {
        let patch: Patch = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        assert!(patch.name.is_unchanged());
        assert_eq!(patch.count, OptionField::SetToValue(3));
    }

    #[test]
    fn explicit_null_deserializes_as_set_to_null() {
        let patch: Patch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(patch.name.is_set_to_null());
        assert!(patch.count.is_unchanged());
    }

    #[test]
    fn value_deserializes_as_set_to_value() {
        let patch: Patch = serde_json::from_str(r#"{"name": "hello"}"#).unwrap();
        assert_eq!(patch.name.value_ref().map(String::as_str), Some("hello"));
    }

    #[test]
    fn nested_option_round_trip() {
        assert_eq!(OptionField::<i32>::from(None).into_option(), None);
        assert_eq!(OptionField::<i32>::from(Some(None)).into_option(), Some(None));
        assert_eq!(OptionField::from(Some(Some(5))).into_option(), Some(Some(5)));
    }
}
