//! The summary trailer, derived from the detail lines.

use crate::detail::{DetailRecord, EntryFlag};
use crate::layout::LineBuilder;
use crate::money::Money;
use crate::record::Record;
use crate::validation::{Validatable, Violations};
use log::{debug, warn};

/// Largest count that fits the 6-wide count fields.
pub const MAX_COUNT: u64 = 999_999;

const AMOUNT_WIDTH: usize = 13;

/// Totals over all detail records of a batch.
///
/// Normally produced by [`SummaryRecord::from_details`]; the fields are
/// public so that arbitrary totals can be encoded, which is why the record
/// still validates its own values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub total_transactions: u64,
    pub total_dollar_amount: Money,
    pub total_debits: u64,
    pub total_debits_amount: Money,
    pub total_credits: u64,
    pub total_credits_amount: Money,
}

impl SummaryRecord {
    /// Builds a summary from debit and credit totals, deriving the
    /// transaction count and dollar amount.
    pub fn new(
        total_debits: u64,
        total_debits_amount: Money,
        total_credits: u64,
        total_credits_amount: Money,
    ) -> Self {
        SummaryRecord {
            total_transactions: total_debits.saturating_add(total_credits),
            total_dollar_amount: total_debits_amount + total_credits_amount,
            total_debits,
            total_debits_amount,
            total_credits,
            total_credits_amount,
        }
    }

    /// Folds the detail records into a summary.
    ///
    /// Returns `None` for an empty list. Records whose flag is neither `C`
    /// nor `D` fall into neither bucket and are left out of every total,
    /// including `total_transactions`.
    pub fn from_details(details: &[DetailRecord]) -> Option<Self> {
        if details.is_empty() {
            return None;
        }

        let mut debits = Vec::new();
        let mut credits = Vec::new();
        let mut unknown = 0usize;
        for record in details {
            match record.flag() {
                Some(EntryFlag::Debit) => debits.push(record),
                Some(EntryFlag::Credit) => credits.push(record),
                None => {
                    warn!(
                        "Detail record for receiver {:?} has flag {:?}, excluded from summary",
                        record.receiver_id, record.credit_or_debit_flag
                    );
                    unknown += 1;
                }
            }
        }

        let summary = SummaryRecord::new(
            debits.len() as u64,
            sum_amounts(&debits),
            credits.len() as u64,
            sum_amounts(&credits),
        );
        debug!(
            "Derived summary: {} transactions ({} unknown skipped), total {}",
            summary.total_transactions, unknown, summary.total_dollar_amount
        );
        Some(summary)
    }
}

fn sum_amounts(records: &[&DetailRecord]) -> Money {
    records
        .iter()
        .map(|record| {
            record.amount().unwrap_or_else(|| {
                warn!(
                    "Detail record for receiver {:?} has unparsable amount {:?}, counted as zero",
                    record.receiver_id, record.amount
                );
                Money::ZERO
            })
        })
        .sum()
}

fn check_count(violations: &mut Violations, field: &'static str, value: u64) {
    if value > MAX_COUNT {
        violations.add(field, format!("must be less than or equal to {}", MAX_COUNT));
    }
}

fn check_amount(violations: &mut Violations, field: &'static str, value: Money) {
    if value.is_negative() {
        violations.add(field, "must be greater than or equal to 0");
    } else if value.to_string().len() > AMOUNT_WIDTH {
        violations.add(
            field,
            format!("is too long (maximum is {} characters)", AMOUNT_WIDTH),
        );
    }
}

impl Validatable for SummaryRecord {
    fn validate(&self) -> Violations {
        let mut violations = Violations::new();
        check_count(&mut violations, "total_transactions", self.total_transactions);
        check_amount(&mut violations, "total_dollar_amount", self.total_dollar_amount);
        check_count(&mut violations, "total_debits", self.total_debits);
        check_amount(&mut violations, "total_debits_amount", self.total_debits_amount);
        check_count(&mut violations, "total_credits", self.total_credits);
        check_amount(&mut violations, "total_credits_amount", self.total_credits_amount);
        violations
    }
}

impl Record for SummaryRecord {
    const MARKER: &'static str = "TS000";
    const NAME: &'static str = "summary record";

    fn layout(&self) -> String {
        LineBuilder::new(Self::MARKER)
            .right(&self.total_transactions.to_string(), 6)
            .right(&self.total_dollar_amount.to_string(), AMOUNT_WIDTH)
            .right(&self.total_debits.to_string(), 6)
            .right(&self.total_debits_amount.to_string(), AMOUNT_WIDTH)
            .right(&self.total_credits.to_string(), 6)
            .right(&self.total_credits_amount.to_string(), AMOUNT_WIDTH)
            .build()
    }
}
