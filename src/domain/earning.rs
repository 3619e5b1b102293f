use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Cents;

/// Identifier supplied by the caller. The ledger never generates these.
pub type EntryId = String;

/// One completed work session on a platform.
///
/// `date` carries no time of day. It serializes as a canonical `YYYY-MM-DD`
/// string, and `NaiveDate` ordering matches the ordering of those strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earning {
    pub id: EntryId,
    /// Amount earned in cents
    pub amount: Cents,
    /// Free-text platform label, e.g. "Uber"
    pub platform: String,
    pub trips: u32,
    pub hours: f64,
    pub date: NaiveDate,
}

impl Earning {
    pub fn new(
        id: impl Into<EntryId>,
        amount: Cents,
        platform: impl Into<String>,
        trips: u32,
        hours: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            platform: platform.into(),
            trips,
            hours,
            date,
        }
    }
}
