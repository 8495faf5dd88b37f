use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tax situation code (CST / cClassTrib) used as the rate table key.
///
/// The code is opaque: no format is enforced beyond trimming surrounding
/// whitespace, so `" 011 "` and `"011"` name the same rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationCode(String);

impl ClassificationCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClassificationCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for ClassificationCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassificationCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for ClassificationCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}
