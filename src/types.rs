use serde::{Deserialize, Serialize};

use crate::calculator;
use crate::error::SplitError;

/// Money in the check's currency, double precision (e.g., 12.5 = $12.50)
pub type Amount = f64;
pub type PartySize = u32;
/// Whole percent (e.g., 15 = 15%)
pub type TipPercentage = u32;

pub const DEFAULT_TIP_OPTIONS: [TipPercentage; 5] = [10, 15, 20, 25, 0];
pub const DEFAULT_TIP_PERCENTAGE: TipPercentage = 20;
pub const DEFAULT_PARTY_SIZE: PartySize = 2;
pub const MIN_PARTY_SIZE: PartySize = 2;
pub const MAX_PARTY_SIZE: PartySize = 99;
pub const DEFAULT_CURRENCY_CODE: &str = "USD";

/// The three values the user edits on the split screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillInput {
    pub check_amount: Amount,
    pub party_size: PartySize,
    pub tip_percentage: TipPercentage,
}

impl BillInput {
    pub fn new(check_amount: Amount, party_size: PartySize, tip_percentage: TipPercentage) -> Self {
        Self { check_amount, party_size, tip_percentage }
    }

    /// Project this input onto its totals.
    pub fn result(&self) -> Result<BillResult, SplitError> {
        calculator::compute(self.check_amount, self.party_size, self.tip_percentage)
    }
}

impl Default for BillInput {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_PARTY_SIZE, DEFAULT_TIP_PERCENTAGE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillResult {
    pub grand_total: Amount,
    pub per_person: Amount,
}
