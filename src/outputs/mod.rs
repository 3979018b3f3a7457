//! Rendering and persistence of fact-check reports.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders a [`Report`](crate::pipeline::Report) for the terminal
//! - [`json`]: Writes a JSON copy of each report when an output directory is set
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 143012_5g-towers-spread-the-coronavirus.json
//!     └── 151544_drinking-bleach-cures-covid-19.json
//! ```

pub mod json;
pub mod markdown;
