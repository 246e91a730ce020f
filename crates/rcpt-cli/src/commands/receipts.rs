//! Receipt commands - list, show, delete and file stored receipts.

use std::path::PathBuf;

use clap::Args;
use console::style;

use rcpt_core::{JsonReceiptStore, ReceiptStore, StoredReceipt};

use super::config::load_config;
use super::process::{format_receipt, OutputFormat};

/// Options shared by every receipt command.
#[derive(Args)]
pub struct StoreArgs {
    /// Receipts directory (default: from config)
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl StoreArgs {
    fn open(&self, config_path: Option<&str>) -> anyhow::Result<JsonReceiptStore> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => load_config(config_path)?.storage.receipts_dir,
        };
        Ok(JsonReceiptStore::new(dir))
    }
}

#[derive(Args)]
pub struct ListArgs {
    /// Only receipts filed under this folder
    #[arg(short, long)]
    folder: Option<String>,

    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Receipt id
    id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print the stored page text as well
    #[arg(long)]
    show_text: bool,

    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Receipt id
    id: String,

    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Receipt id
    id: String,

    /// Target folder; omit to take the receipt out of its folder
    folder: Option<String>,

    #[command(flatten)]
    store: StoreArgs,
}

pub fn list(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let store = args.store.open(config_path)?;

    let receipts = match &args.folder {
        Some(folder) => store.list_in_folder(folder)?,
        None => store.list()?,
    };

    if receipts.is_empty() {
        println!("{} No receipts found in {}", style("ℹ").blue(), store.dir().display());
        return Ok(());
    }

    for stored in &receipts {
        println!("{}", summary_line(stored));
    }

    Ok(())
}

pub fn show(args: ShowArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let store = args.store.open(config_path)?;
    let stored = store.get(&args.id)?;

    println!("{}", format_receipt(&stored.receipt, args.format)?);

    if args.show_text {
        println!("{}", style("Recognized text:").bold());
        println!("{}", stored.raw_text);
    }

    Ok(())
}

pub fn delete(args: DeleteArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let store = args.store.open(config_path)?;
    store.delete(&args.id)?;

    println!("{} Deleted receipt {}", style("✓").green(), args.id);

    Ok(())
}

pub fn move_receipt(args: MoveArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let store = args.store.open(config_path)?;
    let stored = store.move_to_folder(&args.id, args.folder.as_deref())?;

    match &stored.folder {
        Some(folder) => println!("{} Moved {} to {}", style("✓").green(), stored.id, folder),
        None => println!("{} Removed {} from its folder", style("✓").green(), stored.id),
    }

    Ok(())
}

fn summary_line(stored: &StoredReceipt) -> String {
    let receipt = &stored.receipt;
    let created = stored.created_at.with_timezone(&chrono::Local);

    let total = match (receipt.total, receipt.currency.as_deref()) {
        (Some(total), Some(currency)) => format!("{} {}", total, currency),
        (Some(total), None) => total.to_string(),
        (None, _) => "-".to_string(),
    };

    let mut line = format!(
        "{}  {}  {:<24}  {:>12}",
        stored.id,
        created.format("%Y-%m-%d %H:%M"),
        receipt.store_name.as_deref().unwrap_or("(unknown)"),
        total
    );
    if let Some(folder) = &stored.folder {
        line.push_str(&format!("  [{}]", folder));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcpt_core::{normalize, CandidateRecord};

    #[test]
    fn test_summary_line() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonReceiptStore::new(dir.path());

        let receipt = normalize(CandidateRecord {
            store_name: Some("Fresh Mart".to_string()),
            total: Some(12.5),
            currency: Some("USD".to_string()),
            ..Default::default()
        });
        let saved = store.save(receipt, vec![], String::new()).unwrap();
        let filed = store.move_to_folder(&saved.id, Some("Groceries")).unwrap();

        let line = summary_line(&filed);
        assert!(line.starts_with(&saved.id));
        assert!(line.contains("Fresh Mart"));
        assert!(line.contains("12.5 USD"));
        assert!(line.ends_with("[Groceries]"));
    }
}
