//! Process command - extract data from the captured pages of one receipt.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use rcpt_core::{
    CapturedPage, DocumentRecognizer, GenerativeModel, JsonReceiptStore, NoModel,
    ProcessedReceipt, RcptConfig, Receipt, ReceiptPipeline, ReceiptStore, StoredReceipt,
};

use super::config::load_config;
use crate::llm::OpenAiCompatibleModel;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Page files in capture order (.txt recognized text or .pdf)
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the language model and use pattern-based extraction
    #[arg(long)]
    no_llm: bool,

    /// Store the receipt after successful processing
    #[arg(long)]
    save: bool,

    /// Folder to file the stored receipt under (implies --save)
    #[arg(long)]
    folder: Option<String>,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,

    /// Print the aggregated page text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut pages = Vec::new();
    for path in &args.pages {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        let loaded = CapturedPage::load(path)?;
        debug!("{} -> {} page(s)", path.display(), loaded.len());
        pages.extend(loaded);
    }
    let image_refs: Vec<String> = args.pages.iter().map(|p| p.display().to_string()).collect();

    info!("Processing {} page(s) from {} file(s)", pages.len(), args.pages.len());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Reading receipt...");

    let outcome = if args.no_llm || !config.llm.enabled {
        debug!("Language model disabled");
        run_pipeline(NoModel, &pages, image_refs, &args, &config).await
    } else {
        let model = OpenAiCompatibleModel::new(&config.llm)?;
        run_pipeline(model, &pages, image_refs, &args, &config).await
    };

    let (processed, stored) = match outcome {
        Ok(result) => {
            pb.finish_and_clear();
            result
        }
        Err(e) => {
            pb.abandon_with_message("Failed");
            return Err(e);
        }
    };

    if args.show_text {
        eprintln!("{}", style("Recognized text:").bold());
        eprintln!("{}", processed.raw_text);
        eprintln!();
    }

    if args.validate {
        let issues = processed.receipt.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_receipt(&processed.receipt, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if let Some(stored) = stored {
        eprintln!(
            "{} Saved receipt {}{}",
            style("✓").green(),
            stored.id,
            stored
                .folder
                .as_deref()
                .map(|f| format!(" in {}", f))
                .unwrap_or_default()
        );
    }

    eprintln!(
        "{} {:?} extraction, {} page(s), {}ms",
        style("ℹ").blue(),
        processed.strategy,
        processed.page_count,
        processed.processing_time_ms
    );
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn run_pipeline<M: GenerativeModel>(
    model: M,
    pages: &[CapturedPage],
    image_refs: Vec<String>,
    args: &ProcessArgs,
    config: &RcptConfig,
) -> anyhow::Result<(ProcessedReceipt, Option<StoredReceipt>)> {
    let pipeline = ReceiptPipeline::new(DocumentRecognizer, model)
        .with_max_pages(config.pages.max_pages);

    if !args.save && args.folder.is_none() {
        return Ok((pipeline.process(pages).await?, None));
    }

    let store = JsonReceiptStore::new(&config.storage.receipts_dir);
    let (processed, mut stored) = pipeline.process_and_store(pages, image_refs, &store).await?;

    if let Some(folder) = &args.folder {
        stored = store.move_to_folder(&stored.id, Some(folder))?;
    }

    Ok((processed, Some(stored)))
}

pub fn format_receipt(receipt: &Receipt, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Csv => format_csv(receipt),
        OutputFormat::Text => Ok(format_text(receipt)),
    }
}

fn format_csv(receipt: &Receipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "store_name",
        "date",
        "subtotal",
        "tax",
        "tips",
        "total",
        "currency",
        "payment_method",
        "card_last_four",
        "category",
        "items",
    ])?;

    wtr.write_record([
        receipt.store_name.clone().unwrap_or_default(),
        opt_to_string(receipt.date),
        opt_to_string(receipt.subtotal),
        opt_to_string(receipt.tax),
        opt_to_string(receipt.tips),
        opt_to_string(receipt.total),
        receipt.currency.clone().unwrap_or_default(),
        receipt.payment_method.display().to_string(),
        receipt.card_last_four.clone().unwrap_or_default(),
        receipt.category.display().to_string(),
        receipt.items.len().to_string(),
    ])?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(receipt: &Receipt) -> String {
    let mut output = String::new();
    let currency = receipt.currency.as_deref().unwrap_or("");

    output.push_str(&format!(
        "Store: {}\n",
        receipt.store_name.as_deref().unwrap_or("(unknown)")
    ));
    if let Some(address) = &receipt.store_address {
        output.push_str(&format!("  {}\n", address));
    }
    if let Some(phone) = &receipt.store_phone {
        output.push_str(&format!("  {}\n", phone));
    }
    if let Some(date) = receipt.date {
        output.push_str(&format!("Date: {}\n", date));
    }
    if let Some(number) = &receipt.transaction_number {
        output.push_str(&format!("Transaction: {}\n", number));
    }

    if !receipt.items.is_empty() {
        output.push_str("\nItems:\n");
        for item in &receipt.items {
            let label = item
                .quantity_label()
                .map(|q| format!(" {}", q))
                .unwrap_or_default();
            let price = item
                .price
                .map(|p| format!("  {} {}", p, currency))
                .unwrap_or_default();
            output.push_str(&format!("  {}{}{}\n", item.name, label, price));
        }
    }

    output.push('\n');
    for (name, amount) in [
        ("Subtotal", receipt.subtotal),
        ("Tax", receipt.tax),
        ("Tips", receipt.tips),
        ("Total", receipt.total),
    ] {
        if let Some(amount) = amount {
            output.push_str(&format!("{:<9} {} {}\n", format!("{}:", name), amount, currency));
        }
    }

    output.push_str(&format!("\nPayment: {}", receipt.payment_method.display()));
    if let Some(last_four) = &receipt.card_last_four {
        output.push_str(&format!(" ****{}", last_four));
    }
    output.push_str(&format!("\nCategory: {}\n", receipt.category.display()));

    output
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcpt_core::{normalize, CandidateLineItem, CandidateRecord};

    fn sample_receipt() -> Receipt {
        normalize(CandidateRecord {
            store_name: Some("Joe's Diner".to_string()),
            date: Some("2024-03-15".to_string()),
            subtotal: Some(24.0),
            tax: Some(1.5),
            total: Some(25.5),
            currency: Some("USD".to_string()),
            payment_method: Some("Credit Card".to_string()),
            card_last_four: Some("4242".to_string()),
            category: Some("restaurant".to_string()),
            items: vec![
                CandidateLineItem {
                    name: "Coffee".to_string(),
                    quantity: Some(2),
                    price: Some(3.0),
                },
                CandidateLineItem {
                    name: "Pancakes".to_string(),
                    quantity: Some(1),
                    price: Some(18.0),
                },
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&sample_receipt());

        assert!(text.starts_with("Store: Joe's Diner\n"));
        assert!(text.contains("Date: 2024-03-15"));
        assert!(text.contains("  Coffee x2  3 USD"));
        assert!(text.contains("  Pancakes  18 USD"));
        assert!(text.contains("Total:    25.5 USD"));
        assert!(text.contains("Payment: Credit Card ****4242"));
        assert!(text.contains("Category: Restaurant"));
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&sample_receipt()).unwrap();
        let mut lines = csv.lines();

        assert!(lines.next().unwrap().starts_with("store_name,date,"));
        assert_eq!(
            lines.next().unwrap(),
            "Joe's Diner,2024-03-15,24,1.5,,25.5,USD,Credit Card,4242,Restaurant,2"
        );
    }

    #[test]
    fn test_format_json() {
        let json = format_receipt(&sample_receipt(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["store_name"], "Joe's Diner");
        assert_eq!(value["payment_method"], "creditCard");
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }
}
