//! The mandatory batch header line.
//!
//! The header identifies the originator and carries the file's creation
//! date and time. Both are resolved once, when the record is constructed.

use crate::layout::LineBuilder;
use crate::record::Record;
use crate::validation::{
    check_fields, FieldRules, Rule, Validatable, Violations, ALPHANUMERIC_SPACE,
    UPPERCASE_LETTER,
};
use chrono::{Local, NaiveDateTime};

/// Sequence id of the first file generated on a given day.
pub const DEFAULT_SEQUENCE_ID: &str = "A";

pub static HEADER_RULES: &[FieldRules] = &[
    FieldRules {
        field: "originator_id",
        rules: &[Rule::Required, Rule::ExactLength(10), Rule::Numeric],
    },
    FieldRules {
        field: "file_sequence_id",
        rules: &[
            Rule::Required,
            Rule::Pattern {
                regex: &UPPERCASE_LETTER,
                message: "must be a single letter A-Z",
            },
        ],
    },
    FieldRules {
        field: "company_discretionary_data",
        rules: &[
            Rule::Length { min: 0, max: 20 },
            Rule::Pattern {
                regex: &ALPHANUMERIC_SPACE,
                message: "must be Alphanumeric",
            },
        ],
    },
    FieldRules {
        field: "company_entry_description",
        rules: &[
            Rule::Length { min: 0, max: 10 },
            Rule::Pattern {
                regex: &ALPHANUMERIC_SPACE,
                message: "must be Alphanumeric",
            },
        ],
    },
];

/// Batch identity: originator, sequence and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    /// Ten digits assigned to the originator by the processor.
    pub originator_id: String,

    /// `A` for the first file of the day, `B` for the second, and so on.
    pub file_sequence_id: String,

    /// Carried into the ACH batch header generated from this file.
    pub company_discretionary_data: Option<String>,

    /// Shown on the receiver's bank statement.
    pub company_entry_description: Option<String>,

    creation_date: String,
    creation_time: String,
}

impl HeaderRecord {
    /// Creates a header stamped with the current local time.
    pub fn new(originator_id: impl Into<String>) -> Self {
        Self::created_at(originator_id, Local::now().naive_local())
    }

    /// Creates a header stamped with the given time.
    pub fn created_at(originator_id: impl Into<String>, created: NaiveDateTime) -> Self {
        HeaderRecord {
            originator_id: originator_id.into(),
            file_sequence_id: DEFAULT_SEQUENCE_ID.to_string(),
            company_discretionary_data: None,
            company_entry_description: None,
            creation_date: created.format("%Y%m%d").to_string(),
            creation_time: created.format("%I%M").to_string(),
        }
    }

    pub fn with_sequence_id(mut self, sequence_id: impl Into<String>) -> Self {
        self.file_sequence_id = sequence_id.into();
        self
    }

    pub fn with_discretionary_data(mut self, data: impl Into<String>) -> Self {
        self.company_discretionary_data = Some(data.into());
        self
    }

    pub fn with_entry_description(mut self, description: impl Into<String>) -> Self {
        self.company_entry_description = Some(description.into());
        self
    }

    /// `YYYYMMDD`
    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    /// `HHMM` on a 12-hour clock.
    pub fn creation_time(&self) -> &str {
        &self.creation_time
    }
}

impl Validatable for HeaderRecord {
    fn validate(&self) -> Violations {
        check_fields(HEADER_RULES, |field| match field {
            "originator_id" => Some(self.originator_id.as_str()),
            "file_sequence_id" => Some(self.file_sequence_id.as_str()),
            "company_discretionary_data" => self.company_discretionary_data.as_deref(),
            "company_entry_description" => self.company_entry_description.as_deref(),
            _ => None,
        })
    }
}

impl Record for HeaderRecord {
    const MARKER: &'static str = "FH000";
    const NAME: &'static str = "header record";

    fn layout(&self) -> String {
        LineBuilder::new(Self::MARKER)
            .raw(&self.creation_date)
            .raw(&self.creation_time)
            .raw(&self.file_sequence_id)
            .raw(&self.originator_id)
            .left(self.company_discretionary_data.as_deref().unwrap_or_default(), 20)
            .left(self.company_entry_description.as_deref().unwrap_or_default(), 10)
            .build()
    }
}
