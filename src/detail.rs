//! Transaction detail lines, one per credit or debit instruction.

use crate::layout::LineBuilder;
use crate::money::Money;
use crate::record::Record;
use crate::validation::{
    check_fields, FieldRules, Rule, Validatable, Violations, ALPHANUMERIC, AMOUNT, YYYYMMDD,
};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub static DETAIL_RULES: &[FieldRules] = &[
    FieldRules {
        field: "receiver_id",
        rules: &[
            Rule::Required,
            Rule::Length { min: 1, max: 15 },
            Rule::Pattern {
                regex: &ALPHANUMERIC,
                message: "must be Alphanumeric",
            },
        ],
    },
    FieldRules {
        field: "routing_number",
        rules: &[Rule::Required, Rule::ExactLength(9), Rule::Numeric],
    },
    FieldRules {
        field: "account_type",
        rules: &[
            Rule::Required,
            Rule::OneOf {
                values: AccountType::CODES,
                message: "must be DDA or SAV",
            },
        ],
    },
    FieldRules {
        field: "account_number",
        rules: &[Rule::Required, Rule::Length { min: 5, max: 17 }, Rule::Numeric],
    },
    FieldRules {
        field: "effective_date",
        rules: &[
            Rule::Required,
            Rule::Pattern {
                regex: &YYYYMMDD,
                message: "does not match YYYYMMDD",
            },
        ],
    },
    FieldRules {
        field: "credit_or_debit_flag",
        rules: &[
            Rule::Required,
            Rule::OneOf {
                values: EntryFlag::CODES,
                message: "must be C or D",
            },
        ],
    },
    FieldRules {
        field: "amount",
        rules: &[
            Rule::Required,
            Rule::Pattern {
                regex: &AMOUNT,
                message: "does not match $$$$$$$$.cc",
            },
        ],
    },
    FieldRules {
        field: "transaction_id",
        rules: &[
            Rule::Length { min: 0, max: 15 },
            Rule::Pattern {
                regex: &ALPHANUMERIC,
                message: "must be Alphanumeric",
            },
        ],
    },
];

/// Kind of receiver account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    /// Demand deposit (checking, money market).
    Dda,
    /// Savings.
    Sav,
}

impl AccountType {
    pub const CODES: &'static [&'static str] = &["DDA", "SAV"];

    pub fn code(&self) -> &'static str {
        match self {
            AccountType::Dda => "DDA",
            AccountType::Sav => "SAV",
        }
    }
}

impl FromStr for AccountType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DDA" => Ok(AccountType::Dda),
            "SAV" => Ok(AccountType::Sav),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Direction of a transaction relative to the receiver's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryFlag {
    Credit,
    Debit,
}

impl EntryFlag {
    pub const CODES: &'static [&'static str] = &["C", "D"];

    pub fn code(&self) -> &'static str {
        match self {
            EntryFlag::Credit => "C",
            EntryFlag::Debit => "D",
        }
    }
}

impl FromStr for EntryFlag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "C" => Ok(EntryFlag::Credit),
            "D" => Ok(EntryFlag::Debit),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EntryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One transaction as supplied by the caller.
///
/// Values are kept as given so that validation can report every malformed
/// field; [`DetailRecord::flag`] and [`DetailRecord::amount`] expose the
/// typed view used by summary derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DetailRecord {
    /// Matches the transaction back to the customer.
    pub receiver_id: String,

    /// Routing & transit number of the receiver's institution.
    pub routing_number: String,

    /// `DDA` or `SAV`.
    pub account_type: String,

    pub account_number: String,

    /// Date the transaction should post (`YYYYMMDD`).
    pub effective_date: String,

    /// `C` for a credit, `D` for a debit to the receiver's account.
    pub credit_or_debit_flag: String,

    /// `$$$$$$$$.cc`, no currency symbol or separators.
    pub amount: String,

    /// Originator-side reference; overrides the receiver id.
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl DetailRecord {
    pub fn new(
        receiver_id: &str,
        routing_number: &str,
        account_type: &str,
        account_number: &str,
        effective_date: &str,
        credit_or_debit_flag: &str,
        amount: &str,
    ) -> Self {
        DetailRecord {
            receiver_id: receiver_id.to_string(),
            routing_number: routing_number.to_string(),
            account_type: account_type.to_string(),
            account_number: account_number.to_string(),
            effective_date: effective_date.to_string(),
            credit_or_debit_flag: credit_or_debit_flag.to_string(),
            amount: amount.to_string(),
            transaction_id: None,
        }
    }

    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// The parsed direction, or `None` for anything other than `C`/`D`.
    pub fn flag(&self) -> Option<EntryFlag> {
        self.credit_or_debit_flag.parse().ok()
    }

    pub fn account_kind(&self) -> Option<AccountType> {
        self.account_type.parse().ok()
    }

    /// The parsed amount, or `None` if it is not a decimal number.
    pub fn amount(&self) -> Option<Money> {
        self.amount.parse().ok()
    }
}

impl Validatable for DetailRecord {
    fn validate(&self) -> Violations {
        check_fields(DETAIL_RULES, |field| match field {
            "receiver_id" => Some(self.receiver_id.as_str()),
            "routing_number" => Some(self.routing_number.as_str()),
            "account_type" => Some(self.account_type.as_str()),
            "account_number" => Some(self.account_number.as_str()),
            "effective_date" => Some(self.effective_date.as_str()),
            "credit_or_debit_flag" => Some(self.credit_or_debit_flag.as_str()),
            "amount" => Some(self.amount.as_str()),
            "transaction_id" => self.transaction_id.as_deref(),
            _ => None,
        })
    }
}

impl Record for DetailRecord {
    const MARKER: &'static str = "TD000";
    const NAME: &'static str = "detail record";

    fn layout(&self) -> String {
        LineBuilder::new(Self::MARKER)
            .left(&self.receiver_id, 15)
            .raw(&self.routing_number)
            .raw(&self.account_type)
            .right(&self.account_number, 17)
            .raw(&self.effective_date)
            .raw(&self.credit_or_debit_flag)
            .right(&self.amount, 11)
            .left(self.transaction_id.as_deref().unwrap_or_default(), 15)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> DetailRecord {
        DetailRecord::new(
            "RECEIVERID",
            "123456789",
            "DDA",
            "1234509876",
            "20240307",
            "D",
            "12.75",
        )
        .with_transaction_id("TRANSACTIONID")
    }

    #[test]
    fn test_valid_record() {
        assert!(valid().is_valid());
        assert_eq!(valid().flag(), Some(EntryFlag::Debit));
        assert_eq!(valid().account_kind(), Some(AccountType::Dda));
        assert_eq!(valid().amount(), Some(Money::from_cents(1275)));
    }

    #[test]
    fn test_transaction_id_is_optional() {
        let mut record = valid();
        record.transaction_id = None;
        assert!(record.is_valid());
        record.transaction_id = Some(String::new());
        assert!(record.is_valid());
        record.transaction_id = Some("TOO-LONG-TRANSACTION".to_string());
        assert_eq!(record.validate().get("transaction_id").unwrap().len(), 2);
    }

    #[test]
    fn test_reports_every_violated_field() {
        let record = DetailRecord::new(
            "BAD-ID!",
            "12345",
            "CHK",
            "12a",
            "20241301",
            "X",
            "12.5",
        );
        let violations = record.validate();
        assert_eq!(violations.len(), 7);
        for field in [
            "receiver_id",
            "routing_number",
            "account_type",
            "account_number",
            "effective_date",
            "credit_or_debit_flag",
            "amount",
        ] {
            assert!(violations.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let violations = DetailRecord::default().validate();
        assert_eq!(violations.len(), 7);
        assert!(!violations.contains("transaction_id"));
        assert!(violations
            .get("amount")
            .unwrap()
            .contains(&"can't be blank".to_string()));
    }

    #[test]
    fn test_account_number_bounds() {
        let mut record = valid();
        record.account_number = "12345".to_string();
        assert!(record.is_valid());
        record.account_number = "12345678901234567".to_string();
        assert!(record.is_valid());
        record.account_number = "1234".to_string();
        assert!(!record.is_valid());
        record.account_number = "123456789012345678".to_string();
        assert!(!record.is_valid());
    }

    #[test]
    fn test_effective_date_day_not_checked_against_month() {
        let mut record = valid();
        record.effective_date = "20240231".to_string();
        assert!(record.is_valid());
        record.effective_date = "2024-03-07".to_string();
        assert_eq!(
            record.validate().get("effective_date").unwrap(),
            ["does not match YYYYMMDD"]
        );
    }

    #[test]
    fn test_amount_format() {
        let mut record = valid();
        for ok in ["0.01", "12345678.90"] {
            record.amount = ok.to_string();
            assert!(record.is_valid(), "{ok}");
        }
        for bad in ["12", "12.750", "123456789.00", "-1.00", "$1.00", "1,000.00"] {
            record.amount = bad.to_string();
            assert!(!record.is_valid(), "{bad}");
        }
    }

    #[test]
    fn test_encode_layout() {
        let line = valid().encode().unwrap();
        assert_eq!(line.len(), 100);
        assert_eq!(&line[0..5], "TD000");
        assert_eq!(&line[5..20], "RECEIVERID00000");
        assert_eq!(&line[20..29], "123456789");
        assert_eq!(&line[29..32], "DDA");
        assert_eq!(&line[32..49], "00000001234509876");
        assert_eq!(&line[49..57], "20240307");
        assert_eq!(&line[57..58], "D");
        assert_eq!(&line[58..69], "00000012.75");
        assert_eq!(&line[69..84], "TRANSACTIONID00");
        assert_eq!(&line[84..], "0".repeat(16));
    }

    #[test]
    fn test_encode_without_transaction_id() {
        let mut record = valid();
        record.transaction_id = None;
        let line = record.encode().unwrap();
        assert_eq!(&line[69..], "0".repeat(31));
    }

    #[test]
    fn test_encode_invalid_fails() {
        let mut record = valid();
        record.account_type = "CHK".to_string();
        assert!(record.encode().is_err());
    }
}
