pub mod workbook;

pub use workbook::{WorkbookWriter, DATABASE_HEADERS, DATABASE_SHEET, SUMMARY_HEADERS, SUMMARY_SHEET};
