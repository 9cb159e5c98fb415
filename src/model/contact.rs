use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact details left by a prospective client.
///
/// Field names follow the reserved-area form so snapshots written by the
/// web pages deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub nome: String,
    pub ruolo: String,
    pub ente: String,
    pub sede: String,
    pub citta: String,
    pub email: String,
    pub telefono: String,
    pub messaggio: String,
    pub privacy: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Contact {
    pub fn new() -> Self {
        Self {
            timestamp: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// Look up a field by its form name, in Italian or English.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "nome" | "name" | "full_name" => &self.nome,
            "ruolo" | "role" => &self.ruolo,
            "ente" | "org" | "org_name" => &self.ente,
            "sede" | "address" => &self.sede,
            "citta" | "city" => &self.citta,
            "email" => &self.email,
            "telefono" | "phone" => &self.telefono,
            "messaggio" | "message" => &self.messaggio,
            _ => return None,
        };
        Some(value.as_str())
    }
}
