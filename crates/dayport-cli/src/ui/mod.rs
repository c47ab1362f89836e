//! UI primitives for the Dayport CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, color palette, symbols
//! - **Render**: Tables, headers, receipts, hints
//! - **Progress**: Progress bar fed by the import and update runs
//! - **Format**: String utilities (truncate, dates, durations)
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{header, receipt, Badge, UiContext};
//!
//! let ctx = UiContext::from_env(cli.json, cli.format.as_deref(), cli.no_color, cli.ascii);
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! println!("{}", header(&ctx, "import", Some(&vault_path)));
//! println!("{}", receipt(&ctx, Badge::Ok, "Import finished", &items));
//! ```

mod context;
pub mod format;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{
    badge, blank_line, header, hint, kv, print, print_error, receipt, table, Column,
};

pub use progress::ProgressBar;
