//! Loader for customer files: one JSON object per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::customer::Customer;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("line {line}: not a valid customer JSON object")]
    Format {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Parse every line of `reader` as one customer record, keeping input order.
///
/// Stops at the first line that is not a JSON object; nothing is returned in that case.
/// Empty input gives an empty list.
pub fn load_customers<R: BufRead>(reader: R) -> Result<Vec<Customer>> {
    let mut customers = Vec::new();
    // Raw bytes so that bad UTF-8 is reported as a format error, not an IO one.
    for (idx, line) in reader.split(b'\n').enumerate() {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let customer: Customer =
            serde_json::from_slice(&line).map_err(|source| LoadError::Format {
                line: idx + 1,
                source,
            })?;
        customers.push(customer);
    }
    tracing::debug!(count = customers.len(), "loaded customer records");
    Ok(customers)
}

/// Open `path` and load it. The file is closed before this returns.
pub fn load_customers_from_path(path: &Path) -> Result<Vec<Customer>> {
    let file = File::open(path)?;
    load_customers(BufReader::new(file))
}
