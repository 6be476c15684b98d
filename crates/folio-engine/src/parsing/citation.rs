use std::fmt;
use std::str::FromStr;

use super::error::CitationError;

/// A dotted `act.scene.line` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Citation {
    pub act: u32,
    pub scene: u32,
    pub line: u32,
}

impl Citation {
    pub fn parse(raw: &str) -> Result<Self, CitationError> {
        let tokens: Vec<&str> = raw.split('.').collect();
        let [act, scene, line] = tokens[..] else {
            return Err(CitationError::WrongArity {
                count: tokens.len(),
            });
        };
        Ok(Self {
            act: number(act)?,
            scene: number(scene)?,
            line: number(line)?,
        })
    }
}

/// Base-10 digits only; `u32::from_str` alone would also take a leading `+`.
fn number(token: &str) -> Result<u32, CitationError> {
    let invalid = || CitationError::InvalidToken {
        token: token.to_string(),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}

impl FromStr for Citation {
    type Err = CitationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.act, self.scene, self.line)
    }
}
