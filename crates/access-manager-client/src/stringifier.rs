//! # Unique Stringifiers
//!
//! An AccessManager only ever sees users, groups, application components and
//! access levels as strings. A [`UniqueStringifier`] converts an application's
//! own type to and from that string form.
//!
//! Implementations must round-trip (`from_string(to_string(x)) == x`) and must
//! never map two distinct values to the same string. The client does not check
//! either property; it only guarantees that strings are passed through
//! unmodified.

use std::fmt;

/// Bidirectional conversion between a typed value and its unique string form.
pub trait UniqueStringifier<T>: Send + Sync {
    /// Convert a value to its unique string form.
    fn to_string(&self, value: &T) -> String;

    /// Convert a unique string back into a value.
    ///
    /// # Errors
    ///
    /// Returns [`StringifierError`] if `stringified` is not the string form of
    /// any value known to this stringifier.
    fn from_string(&self, stringified: &str) -> Result<T, StringifierError>;
}

/// A string received from the service could not be converted to a typed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to convert '{value}' from its unique string form: {reason}")]
pub struct StringifierError {
    /// The string that failed to convert.
    pub value: String,
    /// Why the conversion failed.
    pub reason: String,
}

impl StringifierError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a value the stringifier has no mapping for.
    pub fn unhandled(value: impl Into<String>) -> Self {
        Self::new(value, "unhandled value")
    }
}

/// Identity stringifier for identifiers that are already strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringUniqueStringifier;

impl UniqueStringifier<String> for StringUniqueStringifier {
    fn to_string(&self, value: &String) -> String {
        value.clone()
    }

    fn from_string(&self, stringified: &str) -> Result<String, StringifierError> {
        Ok(stringified.to_string())
    }
}

/// Stringifier for any type whose `Display` and `FromStr` impls are inverse.
///
/// Useful for enums with a canonical textual form.
pub struct DisplayFromStrStringifier<T> {
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> DisplayFromStrStringifier<T> {
    pub fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> Default for DisplayFromStrStringifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for DisplayFromStrStringifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayFromStrStringifier").finish()
    }
}

impl<T> UniqueStringifier<T> for DisplayFromStrStringifier<T>
where
    T: fmt::Display + std::str::FromStr,
    T::Err: fmt::Display,
{
    fn to_string(&self, value: &T) -> String {
        value.to_string()
    }

    fn from_string(&self, stringified: &str) -> Result<T, StringifierError> {
        stringified
            .parse()
            .map_err(|e: T::Err| StringifierError::new(stringified, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum AccessLevel {
        View,
        Modify,
    }

    impl fmt::Display for AccessLevel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::View => write!(f, "View"),
                Self::Modify => write!(f, "Modify"),
            }
        }
    }

    impl std::str::FromStr for AccessLevel {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "View" => Ok(Self::View),
                "Modify" => Ok(Self::Modify),
                other => Err(format!("unknown access level '{other}'")),
            }
        }
    }

    #[test]
    fn string_stringifier_is_identity() {
        let s = StringUniqueStringifier;
        let value = "user/with?reserved#chars".to_string();
        assert_eq!(s.to_string(&value), value);
        assert_eq!(s.from_string(&value).unwrap(), value);
    }

    #[test]
    fn display_from_str_round_trips() {
        let s = DisplayFromStrStringifier::<AccessLevel>::new();
        for level in [AccessLevel::View, AccessLevel::Modify] {
            assert_eq!(s.from_string(&s.to_string(&level)).unwrap(), level);
        }
    }

    #[test]
    fn display_from_str_reports_unparseable_value() {
        let s = DisplayFromStrStringifier::<AccessLevel>::new();
        let err = s.from_string("Delete").unwrap_err();
        assert_eq!(err.value, "Delete");
        assert!(err.reason.contains("unknown access level"));
    }
}
