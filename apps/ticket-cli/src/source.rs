//! # Purchase Line Sources
//!
//! Everything that can hand purchase lines to the pipeline.
//!
//! ```text
//! ┌──────────────────────┐
//! │  DemoCatalogSource   │──┐
//! ├──────────────────────┤  │   TicketSource::lines()
//! │  JsonFileSource      │──┼─────────────────────────► Vec<PurchaseLine>
//! ├──────────────────────┤  │
//! │  MemorySource        │──┘
//! └──────────────────────┘
//! ```
//!
//! ## JSON File Format
//! ```json
//! [
//!   { "product": { "name": "Legumbres", "unit_price": 2.00, "tax_category": "general" }, "quantity": 2 },
//!   { "product": { "name": "Queso al peso", "unit_price": "0.0185", "tax_category": "reduced" }, "quantity": 250 }
//! ]
//! ```
//!
//! `unit_price` is a decimal number or string with up to four places.

use std::path::{Path, PathBuf};

use ticket_core::{Product, PurchaseLine, TaxCategory, UnitPrice};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Supplies the purchase lines of one ticket.
pub trait TicketSource {
    /// Short description for logs and errors.
    fn describe(&self) -> String;

    /// Returns the lines in ticket order.
    fn lines(&self) -> AppResult<Vec<PurchaseLine>>;
}

// =============================================================================
// Demo Catalog
// =============================================================================

/// Built-in lines: (name, unit price, tax category label, quantity).
const DEMO_LINES: &[(&str, &str, &str, i64)] = &[
    ("Legumbres", "2.00", "general", 2),
    ("Perfume", "20.00", "exempt", 3),
    ("Leche", "1.00", "superReducedC", 6),
    ("Lasaña", "5.00", "superReducedA", 1),
    ("Pan de molde", "1.85", "superReducedA", 1),
    ("Aceite de oliva", "8.99", "superReducedB", 2),
    ("Agua mineral", "0.45", "reduced", 6),
    ("Queso al peso", "0.0185", "reduced", 250),
    ("Detergente", "6.50", "general", 1),
];

/// The static catalog shipped with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCatalogSource;

impl TicketSource for DemoCatalogSource {
    fn describe(&self) -> String {
        "demo catalog".to_string()
    }

    fn lines(&self) -> AppResult<Vec<PurchaseLine>> {
        let lines = DEMO_LINES
            .iter()
            .map(|(name, price, category, quantity)| -> AppResult<PurchaseLine> {
                let unit_price = price.parse::<UnitPrice>().map_err(|e| AppError::Source {
                    source_name: self.describe(),
                    reason: format!("{}: {}", name, e),
                })?;
                Ok(PurchaseLine::new(
                    Product::new(*name, unit_price, TaxCategory::parse(category)),
                    *quantity,
                ))
            })
            .collect::<AppResult<Vec<PurchaseLine>>>()?;

        debug!(count = lines.len(), "Loaded demo catalog");
        Ok(lines)
    }
}

// =============================================================================
// JSON File
// =============================================================================

/// Reads a JSON array of purchase lines from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, reason: impl ToString) -> AppError {
        AppError::Source {
            source_name: self.describe(),
            reason: reason.to_string(),
        }
    }
}

impl TicketSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn lines(&self) -> AppResult<Vec<PurchaseLine>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        let lines: Vec<PurchaseLine> =
            serde_json::from_str(&contents).map_err(|e| self.error(e))?;

        info!(path = ?self.path, count = lines.len(), "Loaded purchase lines from file");
        Ok(lines)
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// Lines already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lines: Vec<PurchaseLine>,
}

impl MemorySource {
    pub fn new(lines: Vec<PurchaseLine>) -> Self {
        MemorySource { lines }
    }
}

impl TicketSource for MemorySource {
    fn describe(&self) -> String {
        format!("{} in-memory lines", self.lines.len())
    }

    fn lines(&self) -> AppResult<Vec<PurchaseLine>> {
        Ok(self.lines.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_catalog_is_recognized_and_non_empty() {
        let lines = DemoCatalogSource.lines().unwrap();
        assert_eq!(lines.len(), DEMO_LINES.len());
        assert!(lines.iter().all(|l| l.product.tax_category.is_recognized()));
        assert!(lines.iter().all(|l| l.quantity > 0));
        assert!(lines.iter().all(|l| !l.product.unit_price.is_negative()));
    }

    #[test]
    fn test_demo_catalog_covers_every_category() {
        let lines = DemoCatalogSource.lines().unwrap();
        for category in TaxCategory::KNOWN {
            assert!(
                lines.iter().any(|l| l.product.tax_category == category),
                "missing {}",
                category
            );
        }
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "product": {{ "name": "Producto 1", "unit_price": 10, "tax_category": "general" }}, "quantity": 2 }},
                {{ "product": {{ "name": "Producto 2", "unit_price": 10.00, "tax_category": "reducido" }}, "quantity": 1 }},
                {{ "product": {{ "name": "Tornillos", "unit_price": "0.333", "tax_category": "general" }}, "quantity": 3 }}
            ]"#
        )
        .unwrap();

        let lines = JsonFileSource::new(file.path()).lines().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].product.unit_price, UnitPrice::from_units(10));
        assert_eq!(lines[1].product.tax_category, TaxCategory::Reduced);
        assert_eq!(lines[2].product.unit_price, UnitPrice::from_scaled(3_330));
    }

    #[test]
    fn test_json_file_source_accepts_decimal_price() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "product": {{ "name": "Tornillos", "unit_price": 0.333, "tax_category": "general" }}, "quantity": 3 }}]"#
        )
        .unwrap();

        let lines = JsonFileSource::new(file.path()).lines().unwrap();
        let ticket = ticket_core::build(&lines);
        assert_eq!(ticket.lines[0].net_amount.to_string(), "1.00");
        assert_eq!(ticket.lines[0].gross_amount.to_string(), "1.21");
    }

    #[test]
    fn test_json_file_source_rejects_bad_price() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "product": {{ "name": "Pan", "unit_price": "1,20", "tax_category": "general" }}, "quantity": 1 }}]"#
        )
        .unwrap();

        let err = JsonFileSource::new(file.path()).lines().unwrap_err();
        assert!(matches!(err, AppError::Source { .. }));
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        let err = source.lines().unwrap_err();
        assert!(matches!(err, AppError::Source { .. }));
    }

    #[test]
    fn test_json_file_source_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = JsonFileSource::new(file.path()).lines().unwrap_err();
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_memory_source_returns_copy() {
        let source = MemorySource::new(DemoCatalogSource.lines().unwrap());
        assert_eq!(source.lines().unwrap(), source.lines().unwrap());
    }
}
