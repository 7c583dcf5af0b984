use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kinds of quiz the backend serves, used as the `:type` path segment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// QA technical training.
    Tech,
    /// Testing theory.
    Theory,
}

impl TestType {
    pub const ALL: [TestType; 2] = [TestType::Tech, TestType::Theory];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Tech => "tech",
            TestType::Theory => "theory",
        }
    }

    /// Human readable title shown in the navigation menu.
    pub fn title(&self) -> &'static str {
        match self {
            TestType::Tech => "QA technical training",
            TestType::Theory => "Testing theory",
        }
    }

    /// Front-end route that opens this quiz, e.g. `/test?type=tech`.
    pub fn route(&self) -> String {
        format!("/test?type={}", self.as_str())
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test type '{0}', expected one of: tech, theory")]
pub struct ParseTestTypeError(pub String);

impl FromStr for TestType {
    type Err = ParseTestTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tech" => Ok(TestType::Tech),
            "theory" => Ok(TestType::Theory),
            _ => Err(ParseTestTypeError(s.to_string())),
        }
    }
}
