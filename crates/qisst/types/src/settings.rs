//! Committee-wide settings

use crate::{CommitteeError, CommitteeResult};
use serde::{Deserialize, Serialize};

/// How often members contribute an installment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
        };
        write!(f, "{}", s)
    }
}

/// Committee configuration read by every other component
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub committee_name: String,
    /// Amount one member contributes per period
    pub installment_amount: f64,
    /// Currency code, display only
    pub currency: String,
    pub frequency: Frequency,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            committee_name: "My Committee".to_string(),
            installment_amount: 1000.0,
            currency: "PKR".to_string(),
            frequency: Frequency::Monthly,
        }
    }
}

impl Settings {
    pub fn with_installment(mut self, amount: f64) -> Self {
        self.installment_amount = amount;
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Reject settings the projector cannot work with.
    pub fn validate(&self) -> CommitteeResult<()> {
        if !self.installment_amount.is_finite() || self.installment_amount <= 0.0 {
            return Err(CommitteeError::Validation(format!(
                "installment amount must be positive, got {}",
                self.installment_amount
            )));
        }
        Ok(())
    }
}
