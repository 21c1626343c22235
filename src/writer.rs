use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::customer::Customer;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create file '{path}'")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize customer")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WriteError>;

/// Write one JSON object per line, newline after each, in list order.
pub fn write_customers<W: Write>(mut writer: W, customers: &[Customer]) -> Result<()> {
    for customer in customers {
        serde_json::to_writer(&mut writer, customer)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write `customers` into it. Not atomic.
pub fn write_customers_to_path(path: &Path, customers: &[Customer]) -> Result<()> {
    let file = File::create(path).map_err(|source| WriteError::CreateFile {
        path: path.display().to_string(),
        source,
    })?;
    write_customers(BufWriter::new(file), customers)?;
    tracing::debug!(count = customers.len(), path = %path.display(), "wrote customers");
    Ok(())
}
