//! JSON output for API consumption.
//!
//! Files are organized by date with edition names:
//! ```text
//! output_dir/
//! └── 2026-08-23/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```

use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

use crate::models::Digest;

/// Write a [`Digest`] to a JSON file under a date-based directory.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_digest(digest: &Digest, output_dir: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;

    // Failures propagate to the caller, which reports them.
    let dir = format!("{}/{}", output_dir.trim_end_matches('/'), digest.local_date);
    fs::create_dir_all(&dir).await?;

    let path = format!("{}/{}.json", dir, digest.edition);
    fs::write(&path, json).await?;
    info!(%path, "Wrote digest JSON");
    Ok(())
}
