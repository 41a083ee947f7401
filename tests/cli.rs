use assert_cmd::Command;
use calamine::{Reader, Xlsx};
use docx_rs::{Docx, Paragraph, Run};
use predicates::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_docx(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let mut docx = Docx::new();
    for line in lines {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();

    let path = dir.join(name);
    std::fs::write(&path, cursor.into_inner()).unwrap();
    path
}

#[test]
fn help_shows_usage() {
    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PDF/DOCX"));
}

#[test]
fn no_arguments_shows_help() {
    Command::cargo_bin("antecedentes")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_config_writes_sample_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("antecedentes.toml");

    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration"));

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[appearance]"));
    assert!(content.contains("0047AB"));
}

#[test]
fn missing_input_exits_with_invalid_path_code() {
    Command::cargo_bin("antecedentes")
        .unwrap()
        .args(["--output-format", "plain", "--quiet"])
        .arg("/no/such/legajo.pdf")
        .assert()
        .code(2);
}

#[test]
fn empty_directory_exits_with_no_inputs_code() {
    let temp_dir = TempDir::new().unwrap();

    Command::cargo_bin("antecedentes")
        .unwrap()
        .args(["--output-format", "plain", "--quiet"])
        .arg(temp_dir.path())
        .assert()
        .code(3);
}

#[test]
fn processes_batch_and_writes_two_sheet_workbook() {
    let input_dir = TempDir::new().unwrap();
    write_docx(
        input_dir.path(),
        "perez.docx",
        &[
            "Sr. Juan Perez",
            "Emitido el 15/03/2022",
            "Apercibimiento por inasistencia reiterada",
            "Descargo presentado por el empleado",
        ],
    );
    write_docx(input_dir.path(), "anon.docx", &["sin datos reconocibles"]);

    let output_dir = TempDir::new().unwrap();
    let workbook_path = output_dir.path().join("antecedentes.xlsx");

    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg(input_dir.path())
        .arg("--output")
        .arg(&workbook_path)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 files processed"));

    let buffer = std::fs::read(&workbook_path).unwrap();
    let mut workbook = Xlsx::new(Cursor::new(buffer)).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Base de Datos".to_string(), "Resumen de Casos".to_string()]
    );

    let range = workbook.worksheet_range("Base de Datos").unwrap();
    assert_eq!(range.height(), 3); // header + 2 data rows

    // Sorted ascending by name, empty name first
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
fn degraded_batch_exits_successfully_with_full_row_count() {
    let input_dir = TempDir::new().unwrap();
    write_docx(input_dir.path(), "bueno.docx", &["Sr. Juan Perez"]);
    std::fs::write(input_dir.path().join("roto.docx"), b"not a docx").unwrap();

    let output_dir = TempDir::new().unwrap();
    let workbook_path = output_dir.path().join("antecedentes.xlsx");

    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg(input_dir.path())
        .arg("--output")
        .arg(&workbook_path)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Errors: 1"));

    let buffer = std::fs::read(&workbook_path).unwrap();
    let mut workbook = Xlsx::new(Cursor::new(buffer)).unwrap();
    let range = workbook.worksheet_range("Base de Datos").unwrap();
    assert_eq!(range.height(), 3); // header + one row per input, unreadable included
}

#[test]
fn refuses_to_overwrite_without_force() {
    let input_dir = TempDir::new().unwrap();
    write_docx(input_dir.path(), "caso.docx", &["Sr. Juan Perez"]);

    let output_dir = TempDir::new().unwrap();
    let workbook_path = output_dir.path().join("antecedentes.xlsx");
    std::fs::write(&workbook_path, b"already here").unwrap();

    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg(input_dir.path())
        .arg("--output")
        .arg(&workbook_path)
        .args(["--output-format", "plain", "--quiet"])
        .assert()
        .code(8);

    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg(input_dir.path())
        .arg("--output")
        .arg(&workbook_path)
        .args(["--output-format", "plain", "--quiet", "--force"])
        .assert()
        .success();
}

#[test]
fn json_output_contains_report() {
    let input_dir = TempDir::new().unwrap();
    write_docx(input_dir.path(), "caso.docx", &["Sr. Juan Perez"]);

    let output_dir = TempDir::new().unwrap();
    let workbook_path = output_dir.path().join("antecedentes.xlsx");

    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg(input_dir.path())
        .arg("--output")
        .arg(&workbook_path)
        .args(["--output-format", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"files_processed\": 1"))
        .stdout(predicate::str::contains("Juan Perez"));
}

#[test]
fn dry_run_does_not_write_workbook() {
    let input_dir = TempDir::new().unwrap();
    write_docx(input_dir.path(), "caso.docx", &["Sr. Juan Perez"]);

    let output_dir = TempDir::new().unwrap();
    let workbook_path = output_dir.path().join("antecedentes.xlsx");

    Command::cargo_bin("antecedentes")
        .unwrap()
        .arg(input_dir.path())
        .arg("--output")
        .arg(&workbook_path)
        .args(["--output-format", "plain", "--dry-run", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"));

    assert!(!workbook_path.exists());
}
