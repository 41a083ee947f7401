use crate::error::{AntecedentesError, Result};
use crate::parser::Record;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::path::Path;

pub const DATABASE_SHEET: &str = "Base de Datos";
pub const SUMMARY_SHEET: &str = "Resumen de Casos";

pub const DATABASE_HEADERS: &[&str] = &[
    "Apellido y Nombre",
    "Fecha de Emisión",
    "Tipo de Antecedente",
    "Contestación",
    "Resumen",
];

pub const SUMMARY_HEADERS: &[&str] = &["Apellido y Nombre", "Resumen"];

/// Serializes a sorted record batch into the two-sheet workbook.
pub struct WorkbookWriter {
    force_overwrite: bool,
}

impl WorkbookWriter {
    pub fn new() -> Self {
        Self {
            force_overwrite: false,
        }
    }

    pub fn with_force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }

    /// Builds the workbook in memory. Row order follows the input slice,
    /// which the batch layer has already sorted by name.
    pub fn build_buffer(&self, records: &[Record]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let database = workbook.add_worksheet();
        database.set_name(DATABASE_SHEET)?;
        write_headers(database, DATABASE_HEADERS, &header_format)?;

        for (index, record) in records.iter().enumerate() {
            let row = (index + 1) as u32;
            database.write_string(row, 0, &record.name)?;
            database.write_string(row, 1, &record.issue_date)?;
            database.write_string(row, 2, record.category.label())?;
            database.write_string(row, 3, record.responded_label())?;
            database.write_string(row, 4, &record.summary)?;
        }

        let summary = workbook.add_worksheet();
        summary.set_name(SUMMARY_SHEET)?;
        write_headers(summary, SUMMARY_HEADERS, &header_format)?;

        for (index, record) in records.iter().enumerate() {
            let row = (index + 1) as u32;
            summary.write_string(row, 0, &record.name)?;
            summary.write_string(row, 1, &record.summary)?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    /// Writes the workbook to disk, refusing to clobber an existing file
    /// unless forced.
    pub fn write_to_file(&self, records: &[Record], path: &Path) -> Result<u64> {
        if path.exists() && !self.force_overwrite {
            return Err(AntecedentesError::OutputFileExists {
                path: path.display().to_string(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let buffer = self.build_buffer(records)?;
        fs::write(path, &buffer)?;

        Ok(buffer.len() as u64)
    }
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Category;
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn sample_records() -> Vec<Record> {
        vec![
            Record {
                name: String::new(),
                issue_date: String::new(),
                category: Category::Otro,
                responded: false,
                summary: "...".to_string(),
            },
            Record {
                name: "Juan Perez".to_string(),
                issue_date: "15/03/2022".to_string(),
                category: Category::Apercibimiento,
                responded: true,
                summary: "sr. juan perez apercibimiento...".to_string(),
            },
        ]
    }

    fn open_workbook(buffer: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        Xlsx::new(Cursor::new(buffer)).unwrap()
    }

    #[test]
    fn test_workbook_has_exactly_two_sheets() {
        let buffer = WorkbookWriter::new().build_buffer(&sample_records()).unwrap();
        let workbook = open_workbook(buffer);

        assert_eq!(
            workbook.sheet_names(),
            vec![DATABASE_SHEET.to_string(), SUMMARY_SHEET.to_string()]
        );
    }

    #[test]
    fn test_database_sheet_headers_and_rows() {
        let buffer = WorkbookWriter::new().build_buffer(&sample_records()).unwrap();
        let mut workbook = open_workbook(buffer);

        let range = workbook.worksheet_range(DATABASE_SHEET).unwrap();
        assert_eq!(range.height(), 3); // header + 2 data rows

        let header: Vec<String> = (0..5)
            .map(|c| range.get_value((0, c)).unwrap().to_string())
            .collect();
        assert_eq!(header, DATABASE_HEADERS);

        // Sorted order preserved: empty-name record first
        assert_eq!(range.get_value((1, 0)).unwrap().to_string(), "");
        assert_eq!(range.get_value((2, 0)).unwrap().to_string(), "Juan Perez");
        assert_eq!(range.get_value((2, 1)).unwrap().to_string(), "15/03/2022");
        assert_eq!(
            range.get_value((2, 2)).unwrap().to_string(),
            "Apercibimiento"
        );
        assert_eq!(range.get_value((2, 3)).unwrap().to_string(), "Sí");
    }

    #[test]
    fn test_summary_sheet_is_name_and_summary_only() {
        let buffer = WorkbookWriter::new().build_buffer(&sample_records()).unwrap();
        let mut workbook = open_workbook(buffer);

        let range = workbook.worksheet_range(SUMMARY_SHEET).unwrap();
        assert_eq!(range.height(), 3);
        assert_eq!(range.width(), 2);
        assert_eq!(
            range.get_value((0, 0)).unwrap().to_string(),
            "Apellido y Nombre"
        );
        assert_eq!(range.get_value((2, 0)).unwrap().to_string(), "Juan Perez");
        assert!(range
            .get_value((2, 1))
            .unwrap()
            .to_string()
            .ends_with("..."));
    }

    #[test]
    fn test_empty_batch_still_produces_workbook() {
        let buffer = WorkbookWriter::new().build_buffer(&[]).unwrap();
        let mut workbook = open_workbook(buffer);

        let range = workbook.worksheet_range(DATABASE_SHEET).unwrap();
        assert_eq!(range.height(), 1); // header only
    }

    #[test]
    fn test_write_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("salida.xlsx");
        std::fs::write(&path, b"already here").unwrap();

        let writer = WorkbookWriter::new();
        let result = writer.write_to_file(&sample_records(), &path);
        assert!(matches!(
            result,
            Err(AntecedentesError::OutputFileExists { .. })
        ));

        let forced = WorkbookWriter::new().with_force_overwrite(true);
        let bytes = forced.write_to_file(&sample_records(), &path).unwrap();
        assert!(bytes > 0);
    }
}
