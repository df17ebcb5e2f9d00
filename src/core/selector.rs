//! Profile selectors
//!
//! A selector is what the user types on the command line: `arch` or
//! `arch:subtarget`.

use std::fmt;
use std::str::FromStr;

/// Parsed `arch[:subtarget]` selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Requested architecture
    pub architecture: String,
    /// Requested subtarget, `None` accepts any
    pub subtarget: Option<String>,
}

impl Selector {
    /// Parse a selector.
    ///
    /// Only a string splitting into exactly two fields on `:` carries a
    /// subtarget. Anything else is taken verbatim as the architecture, so
    /// `a:b:c` looks for an architecture literally named `a:b:c`. An empty
    /// subtarget (`arm:`) means "any subtarget".
    pub fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split(':').collect();
        match parts.as_slice() {
            [arch, sub] => Self {
                architecture: (*arch).to_string(),
                subtarget: if sub.is_empty() {
                    None
                } else {
                    Some((*sub).to_string())
                },
            },
            _ => Self {
                architecture: input.to_string(),
                subtarget: None,
            },
        }
    }
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtarget {
            Some(sub) => write!(f, "{}:{sub}", self.architecture),
            None => write!(f, "{}", self.architecture),
        }
    }
}
