//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Tabled,
};

use risklab_portfolio::SummaryTable;

use crate::cli::OutputFormat;

/// Prints a summary table in the requested format.
pub fn print_summary(table: &SummaryTable, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(&table.title);
            print_table(table);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(table)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for record in table.to_records() {
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Prints several tables; JSON output becomes one array.
pub fn print_summaries(tables: &[SummaryTable], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(tables)?);
        return Ok(());
    }
    for table in tables {
        print_summary(table, format)?;
    }
    Ok(())
}

/// Prints rows of a `Tabled` type in the requested format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("No results.");
                return Ok(());
            }
            let table = tabled::Table::new(data)
                .with(Style::rounded())
                .with(Modify::new(Columns::first()).with(Alignment::left()))
                .to_string();
            println!("{}", table);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for item in data {
                wtr.serialize(item)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn print_table(table: &SummaryTable) {
    let mut builder = Builder::default();
    for record in table.to_records() {
        builder.push_record(record);
    }
    let rendered = builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    if table.is_notice() {
        println!("{}", rendered.dimmed());
    } else {
        println!("{}", rendered);
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Value rendered with fixed precision.
    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format!("{:.prec$}", value, prec = precision),
        }
    }
}
