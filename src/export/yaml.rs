//! YAML export of a complete analysis

use std::io::Write;

use crate::error::{CashplanError, CashplanResult};
use crate::export::json::AnalysisExport;

/// Write the export as YAML with a short header comment
pub fn export_yaml<W: Write>(export: &AnalysisExport, writer: &mut W) -> CashplanResult<()> {
    let io_err = |e: std::io::Error| CashplanError::Export(e.to_string());

    writeln!(writer, "# cashplan analysis for {}", export.month).map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer, "# Amounts are in {}", export.metadata.amount_unit).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, export).map_err(|e| CashplanError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::{sample_accounts, sample_export, sample_transactions};

    #[test]
    fn test_export_yaml() {
        let accounts = sample_accounts();
        let transactions = sample_transactions();
        let export = sample_export(&accounts, &transactions);

        let mut buffer = Vec::new();
        export_yaml(&export, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# cashplan analysis for 2025-01"));
        assert!(text.contains("schema_version:"));

        let body: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(body["metadata"]["account_count"].as_u64(), Some(2));
    }
}
