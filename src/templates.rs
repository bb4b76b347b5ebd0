//! `.gitignore` template catalog
//!
//! Templates come from the community catalog at
//! `github/gitignore`; the body is written byte-for-byte to the local ignore
//! file. Fetching sits behind a trait so workflow tests never touch the
//! network.

use anyhow::{Context, Result, anyhow};
use log::debug;

const CATALOG_BASE: &str = "https://raw.githubusercontent.com/github/gitignore/master";

/// Resolves an ignore-file template by name.
pub trait TemplateFetcher {
    /// Returns the template body, or an error for any non-success outcome
    /// (network failure, unknown template name).
    fn fetch(&self, name: &str) -> Result<String>;
}

/// Fetches templates over HTTPS from the public catalog.
pub struct CatalogFetcher {
    base: String,
}

impl CatalogFetcher {
    pub fn new() -> Self {
        Self {
            base: CATALOG_BASE.to_string(),
        }
    }
}

impl Default for CatalogFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateFetcher for CatalogFetcher {
    fn fetch(&self, name: &str) -> Result<String> {
        let url = format!("{}/{name}.gitignore", self.base);
        debug!("Fetching ignore template from {url}");

        let response = reqwest::blocking::get(&url)
            .with_context(|| format!("Failed to fetch template '{name}'"))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Template '{name}' not found in the catalog (status {})",
                response.status()
            ));
        }

        response
            .text()
            .with_context(|| format!("Failed to read template '{name}'"))
    }
}

/// Fits a template name into a fixed-width column for the settled prompt
/// line, truncating with an ellipsis when it overflows.
pub fn format_template_name(name: &str, width: usize) -> String {
    // Counted in characters, not bytes: template names are user input and may
    // not land on byte boundaries.
    if name.chars().count() > width {
        let kept: String = name.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        format!("{name:width$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_padded_to_width() {
        assert_eq!(format_template_name("Node", 8), "Node    ");
    }

    #[test]
    fn long_names_are_truncated_with_ellipsis() {
        let formatted = format_template_name("VeryLongTemplateName", 10);
        assert_eq!(formatted, "VeryLon...");
        assert_eq!(formatted.len(), 10);
    }

    #[test]
    fn multi_byte_names_are_truncated_on_character_boundaries() {
        let formatted = format_template_name("テンプレートの名前が長い場合", 10);
        assert_eq!(formatted, "テンプレートの...");
        assert_eq!(formatted.chars().count(), 10);
    }

    #[test]
    fn multi_byte_names_within_width_are_padded() {
        let formatted = format_template_name("日本語", 6);
        assert_eq!(formatted, "日本語   ");
    }
}
