//! Excel export of the listed records.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{Agreement, Customer, Invoice, PurchaseOrder};

/// One worksheet cell.
enum Cell<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

/// Write a single-sheet workbook with a styled header row.
fn write_sheet<'a>(
    path: &Path,
    sheet_name: &str,
    columns: &[(&str, f64)],
    rows: impl Iterator<Item = Vec<Cell<'a>>>,
) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet_name)?;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let amount_format = Format::new().set_num_format("#,##0.00");

    for (col, (header, width)) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }

    let mut last_row = 0;
    for (idx, cells) in rows.enumerate() {
        let row = (idx + 1) as u32;
        last_row = row;

        for (col, cell) in cells.into_iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Number(Some(value)) => {
                    worksheet.write_number_with_format(row, col, value, &amount_format)?;
                }
                Cell::Number(None) => {}
            }
        }
    }

    // Autofilter
    if last_row > 0 {
        worksheet.autofilter(0, 0, last_row, (columns.len() - 1) as u16)?;
    }

    // Freeze top row
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}

/// Export customers to Excel file.
pub fn export_customers(customers: &[Customer], path: &Path) -> Result<()> {
    let columns = [("ID", 12.0), ("Name", 30.0), ("Email", 30.0), ("Industry", 20.0)];
    let rows = customers.iter().map(|c| {
        vec![
            Cell::Text(c.id.as_str()),
            Cell::Text(&c.name),
            Cell::Text(c.email.as_deref().unwrap_or("")),
            Cell::Text(c.industry.as_deref().unwrap_or("")),
        ]
    });
    write_sheet(path, "Customers", &columns, rows)?;
    Ok(())
}

/// Export purchase orders to Excel file.
pub fn export_purchase_orders(orders: &[PurchaseOrder], path: &Path) -> Result<()> {
    let columns = [
        ("PO Number", 15.0),
        ("Customer ID", 12.0),
        ("Status", 12.0),
        ("Amount", 14.0),
        ("Billed", 14.0),
        ("Balance", 14.0),
    ];
    let rows = orders.iter().map(|po| {
        vec![
            Cell::Text(&po.po_number),
            Cell::Text(po.customer_id.as_ref().map(|id| id.as_str()).unwrap_or("")),
            Cell::Text(po.status.as_deref().unwrap_or("")),
            Cell::Number(po.amount),
            Cell::Number(po.billed_amount),
            Cell::Number(po.po_balance),
        ]
    });
    write_sheet(path, "Purchase Orders", &columns, rows)?;
    Ok(())
}

/// Export invoices to Excel file.
pub fn export_invoices(invoices: &[Invoice], path: &Path) -> Result<()> {
    let columns = [
        ("Invoice Number", 15.0),
        ("PO ID", 12.0),
        ("Customer ID", 12.0),
        ("Payment Status", 15.0),
        ("Amount", 14.0),
        ("Received", 14.0),
        ("Balance", 14.0),
    ];
    let rows = invoices.iter().map(|inv| {
        vec![
            Cell::Text(&inv.invoice_number),
            Cell::Text(inv.po_id.as_ref().map(|id| id.as_str()).unwrap_or("")),
            Cell::Text(inv.customer_id.as_ref().map(|id| id.as_str()).unwrap_or("")),
            Cell::Text(inv.payment_status.as_deref().unwrap_or("")),
            Cell::Number(inv.amount),
            Cell::Number(inv.amount_received),
            Cell::Number(inv.balance_amount),
        ]
    });
    write_sheet(path, "Invoices", &columns, rows)?;
    Ok(())
}

/// Export agreements and NDAs to Excel file.
pub fn export_agreements(agreements: &[Agreement], path: &Path) -> Result<()> {
    let columns = [
        ("Name", 30.0),
        ("Type", 12.0),
        ("Customer ID", 12.0),
        ("End Date", 12.0),
        ("Renewal Status", 18.0),
    ];
    let rows = agreements.iter().map(|a| {
        vec![
            Cell::Text(&a.name),
            Cell::Text(a.kind.as_deref().unwrap_or("")),
            Cell::Text(a.customer_id.as_ref().map(|id| id.as_str()).unwrap_or("")),
            Cell::Text(a.end_date.as_deref().unwrap_or("")),
            Cell::Text(a.renewal_status.as_deref().unwrap_or("")),
        ]
    });
    write_sheet(path, "Agreements", &columns, rows)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::RecordId;

    #[test]
    fn test_generate_export_filename() {
        let name = generate_export_filename("invoices");
        assert!(name.starts_with("invoices_"));
        assert!(name.ends_with(".xlsx"));
        // invoices_YYYYMMDD_HHMMSS.xlsx
        assert_eq!(name.len(), "invoices_".len() + 15 + ".xlsx".len());
    }

    #[test]
    fn test_export_purchase_orders_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pos.xlsx");
        let orders = vec![
            PurchaseOrder {
                id: RecordId::new("1"),
                po_number: "PO-1001".to_string(),
                customer_id: Some(RecordId::new("4")),
                amount: Some(50000.0),
                billed_amount: Some(12000.0),
                po_balance: Some(38000.0),
                status: Some("Active".to_string()),
            },
            PurchaseOrder {
                po_number: "PO-1002".to_string(),
                ..Default::default()
            },
        ];

        export_purchase_orders(&orders, &path).unwrap();
        let written = std::fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
    }

    #[test]
    fn test_export_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.xlsx");
        export_customers(&[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("agreements.xlsx");
        let err = export_agreements(&[], &path).unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }
}
