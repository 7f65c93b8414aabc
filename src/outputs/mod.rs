//! Output rendering for the assembled digest.
//!
//! # Submodules
//!
//! - [`markdown`]: renders the digest as a Markdown document
//! - [`html`]: renders the digest as a standalone HTML page
//! - [`json`]: writes the digest as JSON for API consumption
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 2026-08-23_morning.md
//! ├── 2026-08-23_morning.html
//! └── 2026-08-23/
//!     └── morning.json
//! ```

pub mod html;
pub mod json;
pub mod markdown;
