mod common;

use common::{Value, temp_path, write_workbook};
use pv_dashboard::cell::CellValue;
use pv_dashboard::error::DashboardError;
use pv_dashboard::loader::SheetLoader;
use std::sync::Arc;

#[test]
fn lists_sheets_in_workbook_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir, "book.xlsx");
    write_workbook(
        &path,
        &[
            ("Second", vec![(0, 0, Value::Text("b"))]),
            ("First", vec![(0, 0, Value::Text("a"))]),
        ],
    );

    let loader = SheetLoader::new();
    let names = loader.list_sheets(&path).unwrap();
    assert_eq!(names.as_slice(), ["Second", "First"]);
}

#[test]
fn reads_cells_positionally() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir, "book.xlsx");
    write_workbook(
        &path,
        &[(
            "Data",
            vec![
                (0, 0, Value::Text("Scenario X")),
                (5, 1, Value::Text("China")),
                (6, 0, Value::Text("Labour")),
                (6, 1, Value::Num(0.021)),
            ],
        )],
    );

    let loader = SheetLoader::new();
    let sheet = loader.read_sheet(&path, "Data").unwrap();
    assert_eq!(sheet.name, "Data");
    assert_eq!(sheet.get(0, 0), &CellValue::Text("Scenario X".into()));
    assert_eq!(sheet.get(5, 1), &CellValue::Text("China".into()));
    assert_eq!(sheet.get(6, 1), &CellValue::Number(0.021));
    assert!(sheet.get(3, 0).is_empty());
}

#[test]
fn used_range_below_a1_keeps_absolute_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir, "offset.xlsx");
    write_workbook(
        &path,
        &[("Late", vec![(5, 1, Value::Text("India")), (6, 1, Value::Num(2.0))])],
    );

    let loader = SheetLoader::new();
    let sheet = loader.read_sheet(&path, "Late").unwrap();
    assert_eq!(sheet.get(5, 1), &CellValue::Text("India".into()));
    assert_eq!(sheet.get(6, 1), &CellValue::Number(2.0));
    assert!(sheet.get(0, 0).is_empty());
}

#[test]
fn repeated_reads_return_identical_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir, "book.xlsx");
    write_workbook(&path, &[("Data", vec![(0, 0, Value::Num(1.5))])]);

    let loader = SheetLoader::new();
    let first = loader.read_sheet(&path, "Data").unwrap();
    let second = loader.read_sheet(&path, "Data").unwrap();
    assert_eq!(*first, *second);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(loader.cached_sheet_count(), 1);
}

#[test]
fn cache_outlives_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir, "book.xlsx");
    write_workbook(&path, &[("Data", vec![(0, 0, Value::Num(1.0))])]);

    let loader = SheetLoader::new();
    loader.list_sheets(&path).unwrap();
    loader.read_sheet(&path, "Data").unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loader.list_sheets(&path).unwrap().as_slice(), ["Data"]);
    assert_eq!(loader.read_sheet(&path, "Data").unwrap().get(0, 0), &CellValue::Number(1.0));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = SheetLoader::new();
    let path = temp_path(&dir, "nope.xlsx");

    assert!(matches!(
        loader.list_sheets(&path),
        Err(DashboardError::FileNotFound(p)) if p == path
    ));
    assert!(matches!(
        loader.read_sheet(&path, "Data"),
        Err(DashboardError::FileNotFound(_))
    ));
}

#[test]
fn not_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir, "fake.xlsx");
    std::fs::write(&path, "country,value\nChina,1\n").unwrap();

    let loader = SheetLoader::new();
    assert!(matches!(
        loader.list_sheets(&path),
        Err(DashboardError::InvalidFormat { .. })
    ));
}

#[test]
fn missing_sheet_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_path(&dir, "book.xlsx");
    write_workbook(&path, &[("Data", vec![(0, 0, Value::Num(1.0))])]);

    let loader = SheetLoader::new();
    let err = loader.read_sheet(&path, "Other").unwrap_err();
    assert!(matches!(err, DashboardError::SheetNotFound { ref sheet, .. } if sheet == "Other"));
    assert!(err.is_not_found());
    assert_eq!(loader.cached_sheet_count(), 0);
}
