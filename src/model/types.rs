use crate::error::{Result, RtsError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Label shown on the outcome page.
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "Sì",
            Answer::No => "No",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "yes"),
            Answer::No => write!(f, "no"),
        }
    }
}

impl FromStr for Answer {
    type Err = RtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "si" | "sì" | "s" => Ok(Answer::Yes),
            "no" | "n" => Ok(Answer::No),
            _ => Err(RtsError::Parse(format!("Invalid answer: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadType {
    Contact,
    Wizard,
    Esito,
    Dashboard,
    #[default]
    Generic,
}

impl LeadType {
    /// Infer the lead type from a page path such as `/area-riservata/esito`.
    ///
    /// Segments are checked from the most specific (last) one backwards.
    pub fn from_path(path: &str) -> Self {
        path.split('/')
            .rev()
            .map(|segment| segment.trim_end_matches(".html").to_lowercase())
            .find_map(|segment| match segment.as_str() {
                "contatti" | "contact" | "contatto" | "contacts" => Some(LeadType::Contact),
                "wizard" | "questionario" => Some(LeadType::Wizard),
                "esito" | "outcome" => Some(LeadType::Esito),
                "dashboard" => Some(LeadType::Dashboard),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for LeadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadType::Contact => write!(f, "contact"),
            LeadType::Wizard => write!(f, "wizard"),
            LeadType::Esito => write!(f, "esito"),
            LeadType::Dashboard => write!(f, "dashboard"),
            LeadType::Generic => write!(f, "generic"),
        }
    }
}
