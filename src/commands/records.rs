//! Record commands: init, add, import, list.
//!
//! CHANGELOG:
//! - 01/12/2026 - Import from JSON records files
//! - 01/11/2026 - Initial implementation

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::MatcherConfig;
use crate::store::{MemoryStore, PersonRecord, Record};
use crate::output::OutputControls;

/// Create the people table for the configured mapping.
pub fn init(config: &MatcherConfig) -> Result<()> {
    let store = config.open_store()?;
    store.create_table(&config.mapping)?;
    println!(
        "Initialized table {} in {}",
        config.table,
        config.database.display()
    );
    Ok(())
}

/// Add one person record.
pub fn add(
    config: &MatcherConfig,
    first: &str,
    middle: Option<&str>,
    last: &str,
    suffix: Option<&str>,
) -> Result<()> {
    let store = config.open_store()?;
    store.create_table(&config.mapping)?;

    let mapping = &config.mapping;
    let record = PersonRecord::new()
        .with(&mapping.first, Some(first))
        .with(&mapping.middle, middle)
        .with(&mapping.last, Some(last))
        .with(&mapping.suffix, suffix);

    let id = store.insert(&record)?;
    println!("Added record #{}: {} {}", id, first, last);
    Ok(())
}

/// Insert every record of a JSON records file.
pub fn import(config: &MatcherConfig, path: &Path) -> Result<()> {
    let source = MemoryStore::load(path)
        .with_context(|| format!("Failed to load records file: {:?}", path))?;

    let mut store = config.open_store()?;
    store.create_table(&config.mapping)?;
    let count = store.insert_all(source.all())?;

    println!("Imported {} records into {}", count, config.table);
    Ok(())
}

/// List all records.
pub fn list(config: &MatcherConfig, output: &OutputControls) -> Result<()> {
    let store = config.open_store()?;
    let records = store.all()?;

    if output.json {
        output.print(&records);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records found.");
        println!("Run 'namematch import <file>' or 'namematch add' to add some.");
        return Ok(());
    }

    let mapping = &config.mapping;
    println!("Records ({}):", records.len());
    println!("{}", "-".repeat(50));
    for record in &records {
        let name: Vec<&str> = mapping
            .columns()
            .iter()
            .filter_map(|f| record.field(f))
            .collect();
        println!("#{}: {}", record.id.unwrap_or_default(), name.join(" "));
    }
    Ok(())
}
