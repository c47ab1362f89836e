//! Output mode routing logic.

/// Output mode determines how results are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON output only
    Json,
    /// Plain text, stable for logs and scripts
    #[default]
    Plain,
    /// Human-friendly with colors, progress bar and tables (TTY only)
    Pretty,
}

/// Values accepted by `--format`.
pub const FORMATS: &[&str] = &["pretty", "plain", "json"];

impl OutputMode {
    /// Resolve output mode from flags and environment.
    ///
    /// Routing rules:
    /// 1. `--json` or `--format json` overrides everything
    /// 2. `--format plain` forces plain
    /// 3. `TERM=dumb` forces plain
    /// 4. Pretty only when stdout is TTY
    /// 5. Default to plain for non-TTY
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag || format_flag == Some("json") {
            return Self::Json;
        }

        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }

        if is_tty {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    /// Check a `--format` value.
    pub fn validate_format(format_flag: Option<&str>) -> Result<(), String> {
        match format_flag {
            Some(value) if !FORMATS.contains(&value) => Err(format!(
                "Unknown output format '{}' (expected one of: {})",
                value,
                FORMATS.join(", ")
            )),
            _ => Ok(()),
        }
    }

    /// Check if this mode should output JSON.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Check if this mode should output pretty (human) format.
    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
