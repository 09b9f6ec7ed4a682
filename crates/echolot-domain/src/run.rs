//! Pipeline run identifiers

use std::fmt;

/// Identifier for one pipeline run, based on UUIDv7
///
/// UUIDv7 values sort chronologically, so log lines from consecutive runs
/// stay ordered when grouped by run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u128);

impl RunId {
    /// Generate a new run identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use echolot_domain::RunId;
    ///
    /// let id = RunId::new();
    /// assert_eq!(id.to_string().len(), 36);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RunId from a raw value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_chronological() {
        let first = RunId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = RunId::new();
        assert!(first < second);
    }

    #[test]
    fn test_display_is_hyphenated_uuid() {
        let id = RunId::from_value(0);
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ordering of run ids matches the underlying value
        #[test]
        fn test_ordering_property(a: u128, b: u128) {
            let id_a = RunId::from_value(a);
            let id_b = RunId::from_value(b);
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
            prop_assert_eq!(id_a.value(), a);
        }
    }
}
