//! CSV cash-flow loader
//!
//! Expects a header row with `period` and `amount` columns; rows keep file
//! order.

use super::CashFlow;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, serde::Deserialize)]
struct CashFlowRecord {
    #[serde(alias = "Period")]
    period: u32,
    #[serde(alias = "Amount")]
    amount: f64,
}

/// Load cash flows from a CSV file
pub fn load_cash_flows_csv(path: &Path) -> Result<Vec<CashFlow>, Box<dyn Error + Send + Sync>> {
    let file = File::open(path)?;
    let flows = read_cash_flows(file)?;
    log::info!("loaded {} cash flows from {}", flows.len(), path.display());
    Ok(flows)
}

/// Read cash flows from any CSV source
pub fn read_cash_flows<R: Read>(source: R) -> Result<Vec<CashFlow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(source);

    reader
        .deserialize::<CashFlowRecord>()
        .map(|record| record.map(|r| CashFlow::new(r.period, r.amount)))
        .collect()
}
