//! # fepfile
//!
//! Builds fixed-width batch files for submitting EFT/ACH transactions to a
//! payment processor. Every line is exactly 100 characters and the file is
//! an ordered sequence of records:
//!
//! ```text
//! XX000...   optional comment
//! FH000...   header
//! TD000...   one per transaction
//! TS000...   summary derived from the transactions
//! ```
//!
//! ## Design Principles
//!
//! - **Complete diagnostics**: validation reports every failing field of
//!   every record, never only the first
//! - **Fixed-point arithmetic**: amounts are summed with `rust_decimal` at
//!   2 decimal places
//! - **Derived summary**: recomputed from the detail list on every request
//! - **All or nothing**: a batch renders completely or not at all
//!
//! ## Example
//!
//! ```
//! use fepfile::Batch;
//!
//! let mut batch = Batch::new();
//! batch.set_comment("This Is My Very Cool Comment");
//! batch.set_header("2283333011", Some("MYCOMPANY"), None);
//! batch.add_transaction("RECEIVERID1", "123456789", "DDA", "1234509876", "20240307", "D", "12.75", "TRANSACTIONID");
//! batch.add_transaction("RECEIVERID3", "123456789", "DDA", "1234509876", "20240307", "C", "27.21", "");
//!
//! let lines = batch.render().unwrap();
//! assert_eq!(lines.len(), 5);
//! assert!(lines.iter().all(|line| line.len() == 100));
//! ```

pub mod batch;
pub mod comment;
pub mod detail;
pub mod error;
pub mod header;
pub mod layout;
pub mod money;
pub mod record;
pub mod summary;
pub mod validation;

pub use batch::{default_file_name, Batch, ValidationReport, LINE_ENDING};
pub use comment::CommentRecord;
pub use detail::{AccountType, DetailRecord, EntryFlag};
pub use error::{FepError, Result};
pub use header::HeaderRecord;
pub use layout::{FILL, RECORD_WIDTH};
pub use money::Money;
pub use record::Record;
pub use summary::SummaryRecord;
pub use validation::{FieldRules, Rule, Validatable, Violations};
