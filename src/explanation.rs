//! Score explanation tree
//!
//! An explanation is a value, a human-readable description, and an ordered
//! list of child explanations. Baseline matches carry the engine's own
//! explanation, converted through its JSON form; decorators build new nodes
//! on top of it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Score};

/// A node in the score explanation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    value: Score,
    description: String,
    #[serde(default)]
    details: Vec<Explanation>,
}

impl Explanation {
    pub fn new(value: Score, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
            details: Vec::new(),
        }
    }

    /// Append a child explanation.
    pub fn add_detail(&mut self, detail: Explanation) {
        self.details.push(detail);
    }

    pub fn value(&self) -> Score {
        self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &[Explanation] {
        &self.details
    }

    /// Convert the engine's explanation into this tree.
    ///
    /// The engine type is serialize-only, so the conversion goes through its
    /// JSON form.
    pub(crate) fn from_engine(explanation: &tantivy::query::Explanation) -> Result<Self> {
        serde_json::from_str(&explanation.to_pretty_json())
            .map_err(|err| Error::Explanation(err.to_string()))
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} ({})", self.value, self.description)?;
        if !self.details.is_empty() {
            write!(f, " [")?;
            for (i, detail) in self.details.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{detail}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
