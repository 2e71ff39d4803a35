use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "₹";

/// Display preferences shared by all clients. The currency is a symbol that
/// clients prefix to every amount; amounts themselves carry no unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSettings {
    #[serde(
        default,
        deserialize_with = "crate::form_utils::deserialize_optional_string"
    )]
    pub currency: Option<String>,
}
