use crate::Result;
use compact_str::CompactString;
use core::borrow::Borrow;
use core::fmt;
use ohno::app_err;

/// The identifier of a metric, guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MetricKey(CompactString);

impl MetricKey {
    /// Create a metric key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or only whitespace
    pub fn new(key: impl Into<CompactString>) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(app_err!("metric key must not be blank"));
        }

        Ok(Self(key))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MetricKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MetricKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MetricKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
