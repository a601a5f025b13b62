//! Split arithmetic
//!
//! Pure functions turning a check amount, a party size and a tip
//! percentage into the grand total and each person's share. Nothing here
//! validates or rounds: clamping inputs and formatting outputs belong to
//! the caller.

use crate::error::SplitError;
use crate::types::*;
use tracing::{debug, warn};

/// Check amount plus the tip on top of it.
pub fn compute_grand_total(check_amount: Amount, tip_percentage: TipPercentage) -> Amount {
    check_amount + check_amount * tip_percentage as Amount / 100.0
}

/// Even share of `grand_total` for each of `party_size` people.
pub fn compute_per_person(grand_total: Amount, party_size: PartySize) -> Result<Amount, SplitError> {
    if party_size == 0 {
        warn!(grand_total, "per-person share requested for an empty party");
        return Err(SplitError::DivisionByZero);
    }
    Ok(grand_total / party_size as Amount)
}

pub fn compute(
    check_amount: Amount,
    party_size: PartySize,
    tip_percentage: TipPercentage,
) -> Result<BillResult, SplitError> {
    debug!(check_amount, party_size, tip_percentage, "computing split");
    let grand_total = compute_grand_total(check_amount, tip_percentage);
    let per_person = compute_per_person(grand_total, party_size)?;
    Ok(BillResult { grand_total, per_person })
}
