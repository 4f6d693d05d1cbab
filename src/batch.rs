//! The batch file: comment, header, detail lines and derived summary.
//!
//! A [`Batch`] collects records, validates them as a whole and renders them
//! in file order. Rendering either succeeds for every line or fails with
//! the complete set of violations; there is no partial output.

use crate::comment::CommentRecord;
use crate::detail::DetailRecord;
use crate::error::{FepError, Result};
use crate::header::HeaderRecord;
use crate::record::Record;
use crate::summary::SummaryRecord;
use crate::validation::{Validatable, Violations};
use chrono::{Local, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Line terminator of the batch file.
pub const LINE_ENDING: &str = "\r\n";

/// Every violation in a batch, keyed by record identity.
///
/// Entries appear in file order: structural problems under `batch`, then
/// `comment`, `header`, each invalid `detail[N]` and finally `summary`.
/// Detail entries also carry the routing and account number of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReportEntry {
    record: String,
    context: Option<String>,
    violations: Violations,
}

impl ValidationReport {
    fn push(&mut self, record: impl Into<String>, context: Option<String>, violations: Violations) {
        if !violations.is_empty() {
            self.entries.push(ReportEntry {
                record: record.into(),
                context,
                violations,
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of records with violations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, record: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.record == record)
    }

    /// Violations for the record with the given identity, e.g. `detail[2]`.
    pub fn get(&self, record: &str) -> Option<&Violations> {
        self.entry(record).map(|entry| &entry.violations)
    }

    /// Extra identification of the record, e.g. `routing 123456789, account 12345`.
    pub fn context(&self, record: &str) -> Option<&str> {
        self.entry(record).and_then(|entry| entry.context.as_deref())
    }

    pub fn records(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.record.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Violations)> {
        self.entries
            .iter()
            .map(|entry| (entry.record.as_str(), &entry.violations))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (record, violations)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            match self.context(record) {
                Some(context) => write!(f, "{} ({}): {}", record, context, violations)?,
                None => write!(f, "{}: {}", record, violations)?,
            }
        }
        Ok(())
    }
}

/// In-memory representation of one batch file.
///
/// The summary is never stored; [`Batch::summary_record`] derives it from
/// the current detail list on every call.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    comment: Option<CommentRecord>,
    header: Option<HeaderRecord>,
    details: Vec<DetailRecord>,
}

impl Batch {
    /// Creates an empty batch. It is not valid until it has a header and at
    /// least one transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file comment.
    pub fn set_comment(&mut self, comment: &str) {
        self.set_comment_record(CommentRecord::new(comment));
    }

    pub fn set_comment_record(&mut self, record: CommentRecord) {
        self.comment = Some(record);
    }

    pub fn comment(&self) -> Option<&CommentRecord> {
        self.comment.as_ref()
    }

    /// Sets the file header, stamped with the current time. A missing
    /// sequence id defaults to `A`.
    pub fn set_header(
        &mut self,
        originator_id: &str,
        company_entry_description: Option<&str>,
        file_sequence_id: Option<&str>,
    ) {
        let mut header = HeaderRecord::new(originator_id);
        if let Some(description) = company_entry_description {
            header = header.with_entry_description(description);
        }
        if let Some(sequence_id) = file_sequence_id {
            header = header.with_sequence_id(sequence_id);
        }
        self.set_header_record(header);
    }

    pub fn set_header_record(&mut self, record: HeaderRecord) {
        self.header = Some(record);
    }

    pub fn header(&self) -> Option<&HeaderRecord> {
        self.header.as_ref()
    }

    /// Appends a transaction built from its fields. An empty
    /// `transaction_id` is stored as absent.
    #[allow(clippy::too_many_arguments)]
    pub fn add_transaction(
        &mut self,
        receiver_id: &str,
        routing_number: &str,
        account_type: &str,
        account_number: &str,
        effective_date: &str,
        credit_or_debit_flag: &str,
        amount: &str,
        transaction_id: &str,
    ) {
        let mut record = DetailRecord::new(
            receiver_id,
            routing_number,
            account_type,
            account_number,
            effective_date,
            credit_or_debit_flag,
            amount,
        );
        if !transaction_id.is_empty() {
            record = record.with_transaction_id(transaction_id);
        }
        self.add_detail_record(record);
    }

    /// Appends a detail record. Order is preserved and duplicates are kept.
    pub fn add_detail_record(&mut self, record: DetailRecord) {
        debug!(
            "Adding detail record #{}: {} {} for receiver {}",
            self.details.len() + 1,
            record.credit_or_debit_flag,
            record.amount,
            record.receiver_id
        );
        self.details.push(record);
    }

    /// Appends every transaction from a CSV source with a header row naming
    /// the detail fields.
    ///
    /// Rows are only appended once the whole input has been read; a
    /// malformed row leaves the batch unchanged. Returns the number of
    /// records added.
    pub fn add_transactions_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.deserialize::<DetailRecord>() {
            let mut record = result?;
            if record.transaction_id.as_deref() == Some("") {
                record.transaction_id = None;
            }
            records.push(record);
        }

        let added = records.len();
        for record in records {
            self.add_detail_record(record);
        }
        Ok(added)
    }

    pub fn details(&self) -> &[DetailRecord] {
        &self.details
    }

    /// Derives the summary from the current detail list; `None` when there
    /// are no details.
    pub fn summary_record(&self) -> Option<SummaryRecord> {
        SummaryRecord::from_details(&self.details)
    }

    /// `true` if the comment (when present), the header and every detail
    /// record are valid and there is at least one detail record.
    pub fn is_valid(&self) -> bool {
        self.comment.as_ref().map_or(true, |c| c.is_valid())
            && self.header.as_ref().is_some_and(|h| h.is_valid())
            && !self.details.is_empty()
            && self.details.iter().all(|d| d.is_valid())
    }

    /// Collects every violation of every record, including the derived
    /// summary.
    pub fn validation_report(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let mut structure = Violations::new();
        if self.header.is_none() {
            structure.add("header", "can't be blank");
        }
        if self.details.is_empty() {
            structure.add("detail_records", "must contain at least one transaction");
        }
        report.push("batch", None, structure);

        if let Some(comment) = &self.comment {
            report.push("comment", None, comment.validate());
        }
        if let Some(header) = &self.header {
            report.push("header", None, header.validate());
        }
        for (i, detail) in self.details.iter().enumerate() {
            report.push(
                format!("detail[{}]", i),
                Some(format!(
                    "routing {}, account {}",
                    detail.routing_number, detail.account_number
                )),
                detail.validate(),
            );
        }
        if let Some(summary) = self.summary_record() {
            report.push("summary", None, summary.validate());
        }

        report
    }

    /// Encodes the batch as ordered 100-character lines: comment (if any),
    /// header, one line per detail record, summary.
    pub fn render(&self) -> Result<Vec<String>> {
        let report = self.validation_report();
        if !report.is_empty() {
            return Err(FepError::Validation(report));
        }

        let (header, summary) = match (&self.header, self.summary_record()) {
            (Some(header), Some(summary)) => (header, summary),
            _ => return Err(FepError::Validation(report)),
        };

        let mut lines = Vec::with_capacity(self.details.len() + 3);
        if let Some(comment) = &self.comment {
            lines.push(comment.encode()?);
        }
        lines.push(header.encode()?);
        for detail in &self.details {
            lines.push(detail.encode()?);
        }
        lines.push(summary.encode()?);
        Ok(lines)
    }

    /// Writes the rendered batch, each line terminated by CRLF.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let lines = self.render()?;
        write_lines(&lines, writer)
    }

    /// Saves the batch into `dir`, returning the path written.
    ///
    /// Without a `file_name` a timestamped `fepfile_YYYYMMDDHHMMSS.txt` is
    /// used. Nothing is created when the batch is invalid.
    pub fn save(&self, dir: impl AsRef<Path>, file_name: Option<&str>) -> Result<PathBuf> {
        let lines = self.render()?;
        let name = match file_name {
            Some(name) => name.to_string(),
            None => default_file_name(Local::now().naive_local()),
        };
        let path = dir.as_ref().join(name);

        write_lines(&lines, BufWriter::new(File::create(&path)?))?;

        info!("Saved {} records to {}", lines.len(), path.display());
        Ok(path)
    }
}

fn write_lines<W: Write>(lines: &[String], mut writer: W) -> Result<()> {
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(LINE_ENDING.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// `fepfile_YYYYMMDDHHMMSS.txt` for the given time.
pub fn default_file_name(now: NaiveDateTime) -> String {
    format!("fepfile_{}.txt", now.format("%Y%m%d%H%M%S"))
}
