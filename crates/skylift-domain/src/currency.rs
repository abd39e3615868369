//! Currencies accepted for fares.

use serde::{Deserialize, Serialize};

/// Currency a fare is quoted in. Forwarded to the payment gateway with the
/// amount; not a stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "UGX")]
    Ugx,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// ISO 4217 code, as the gateway expects it.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Ugx => "UGX",
            Currency::Usd => "USD",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "UGX" => Some(Currency::Ugx),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
