//! CSV catalog import tests
//!
//! Tests for the import file format: required versus optional columns,
//! empty-field handling, and rejection of malformed rows.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// The shape an import row must deserialize into: product_code, name and
/// recommended_price are required, everything else may be absent.
#[derive(Debug, Deserialize)]
struct ImportRow {
    product_code: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    supplier_name: Option<String>,
    #[serde(default)]
    cost_price: Option<Decimal>,
    recommended_price: Decimal,
    #[serde(default)]
    negotiation_margin: Option<Decimal>,
    #[serde(default)]
    stock: Option<i32>,
    #[serde(default)]
    is_active: Option<bool>,
}

fn parse(data: &str) -> Vec<csv::Result<ImportRow>> {
    csv::Reader::from_reader(data.as_bytes())
        .deserialize::<ImportRow>()
        .collect()
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test parsing a fully populated row
    #[test]
    fn test_full_row() {
        let data = "\
product_code,name,description,supplier_name,cost_price,recommended_price,negotiation_margin,stock,is_active
CAN-001,Caneca Azul,Caneca de ceramica,Ceramicas Ltda,12.50,29.90,10.00,25,true
";
        let rows = parse(data);
        assert_eq!(rows.len(), 1);

        let row = rows.into_iter().next().unwrap().unwrap();
        assert_eq!(row.product_code, "CAN-001");
        assert_eq!(row.name, "Caneca Azul");
        assert_eq!(row.supplier_name.as_deref(), Some("Ceramicas Ltda"));
        assert_eq!(row.cost_price, Some(dec("12.50")));
        assert_eq!(row.recommended_price, dec("29.90"));
        assert_eq!(row.negotiation_margin, Some(dec("10.00")));
        assert_eq!(row.stock, Some(25));
        assert_eq!(row.is_active, Some(true));
    }

    /// Test that a file with only the required columns parses
    #[test]
    fn test_required_columns_only() {
        let data = "\
product_code,name,recommended_price
CAN-001,Caneca Azul,29.90
CAN-002,Caneca Verde,31.50
";
        let rows = parse(data);
        assert_eq!(rows.len(), 2);

        for row in rows {
            let row = row.unwrap();
            assert_eq!(row.description, None);
            assert_eq!(row.supplier_name, None);
            assert_eq!(row.cost_price, None);
            assert_eq!(row.stock, None);
            assert_eq!(row.is_active, None);
        }
    }

    /// Test that empty optional fields become None
    #[test]
    fn test_empty_optional_fields() {
        let data = "\
product_code,name,description,supplier_name,cost_price,recommended_price,negotiation_margin,stock,is_active
CAN-001,Caneca Azul,,,,29.90,,,
";
        let row = parse(data).into_iter().next().unwrap().unwrap();
        assert_eq!(row.description, None);
        assert_eq!(row.supplier_name, None);
        assert_eq!(row.cost_price, None);
        assert_eq!(row.recommended_price, dec("29.90"));
        assert_eq!(row.negotiation_margin, None);
        assert_eq!(row.stock, None);
        assert_eq!(row.is_active, None);
    }

    /// Test that a missing required column fails the row
    #[test]
    fn test_missing_required_column() {
        let data = "\
product_code,name
CAN-001,Caneca Azul
";
        let rows = parse(data);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_err());
    }

    /// Test that malformed numerics fail the row, not the file
    #[test]
    fn test_malformed_numeric_field() {
        let data = "\
product_code,name,recommended_price,stock
CAN-001,Caneca Azul,not-a-price,5
CAN-002,Caneca Verde,31.50,oops
CAN-003,Caneca Roxa,14.00,3
";
        let rows = parse(data);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_err());
        assert!(rows[1].is_err());

        let ok = rows[2].as_ref().unwrap();
        assert_eq!(ok.product_code, "CAN-003");
        assert_eq!(ok.stock, Some(3));
    }

    /// Test that column order does not matter
    #[test]
    fn test_column_order_irrelevant() {
        let data = "\
recommended_price,stock,name,product_code
45.00,8,Caneca Preta,CAN-009
";
        let row = parse(data).into_iter().next().unwrap().unwrap();
        assert_eq!(row.product_code, "CAN-009");
        assert_eq!(row.recommended_price, dec("45.00"));
        assert_eq!(row.stock, Some(8));
    }

    /// Test that quoted fields may carry commas
    #[test]
    fn test_quoted_fields() {
        let data = "\
product_code,name,description,recommended_price
CAN-010,\"Caneca, edicao especial\",\"Alca dourada, 300ml\",52.00
";
        let row = parse(data).into_iter().next().unwrap().unwrap();
        assert_eq!(row.name, "Caneca, edicao especial");
        assert_eq!(row.description.as_deref(), Some("Alca dourada, 300ml"));
    }

    /// Test that prices keep their two-decimal precision
    #[test]
    fn test_price_precision_preserved() {
        let data = "\
product_code,name,recommended_price
CAN-011,Caneca Branca,59.90
";
        let row = parse(data).into_iter().next().unwrap().unwrap();
        assert_eq!(row.recommended_price, dec("59.90"));
        assert_eq!(row.recommended_price.scale(), 2);
    }
}
