//! fepfile CLI
//!
//! Reads transactions from a CSV file and writes a fixed-width batch file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.csv --originator-id 2283333011 --entry-description MYCOMPANY
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use fepfile::{Batch, HeaderRecord, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "fepfile", version, about = "Build a fixed-width EFT batch file")]
struct Cli {
    /// CSV file of transactions with a header row
    input: PathBuf,

    /// Ten-digit id assigned to the originator
    #[arg(long)]
    originator_id: String,

    /// Shown on the receiver's bank statement
    #[arg(long)]
    entry_description: Option<String>,

    #[arg(long)]
    discretionary_data: Option<String>,

    /// A for the first file of the day, B for the second, ...
    #[arg(long, default_value = "A")]
    sequence_id: String,

    /// Free-text comment line
    #[arg(long)]
    comment: Option<String>,

    /// Directory the batch file is saved into
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// File name (defaults to fepfile_YYYYMMDDHHMMSS.txt)
    #[arg(long)]
    file_name: Option<String>,

    /// Write the batch to stdout instead of saving it
    #[arg(long, conflicts_with_all = ["output_dir", "file_name"])]
    stdout: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut batch = Batch::new();

    if let Some(comment) = &cli.comment {
        batch.set_comment(comment);
    }

    let mut header = HeaderRecord::new(cli.originator_id).with_sequence_id(cli.sequence_id);
    if let Some(description) = cli.entry_description {
        header = header.with_entry_description(description);
    }
    if let Some(data) = cli.discretionary_data {
        header = header.with_discretionary_data(data);
    }
    batch.set_header_record(header);

    let file = File::open(&cli.input)?;
    batch.add_transactions_csv(BufReader::new(file))?;

    if cli.stdout {
        let stdout = io::stdout();
        batch.write_to(stdout.lock())?;
    } else {
        let path = batch.save(&cli.output_dir, cli.file_name.as_deref())?;
        println!("{}", path.display());
    }

    Ok(())
}
