// ==========================================
// End-to-end pipeline tests
// ==========================================
// Directory of ODS documents → typed records → target table, with
// per-file failure isolation and aggregate counting.
// ==========================================


use chrono::Utc;
use ods_mtr_loader::{
    db, logging, DatabaseSettings, FileProcessor, LoadContext, LoadError, Settings,
};
use std::path::Path;
use test_helpers::*;

const TABLE: &str = "перенос_мтр";

fn settings(input_dir: &Path, db_path: &Path) -> Settings {
    Settings {
        input_dir: input_dir.to_path_buf(),
        database: DatabaseSettings {
            path: db_path.to_str().unwrap().to_string(),
            table_name: TABLE.to_string(),
        },
    }
}

fn table_count(conn: &rusqlite::Connection) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM \"{}\"", TABLE), [], |row| {
        row.get(0)
    })
    .unwrap()
}

/// jan.ods: 3 valid rows; feb.ods: corrupt; mar.ods: 2 valid rows plus
/// one with an invalid date. Expected: 3 files found, 5 rows inserted.
#[test]
fn test_mixed_directory_scenario() {
    logging::init_test();

    let input = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("mtr.sqlite");

    let mut jan = vec![mtr_header()];
    jan.push(mtr_row("ЛЗК-1", "2024-01-10"));
    jan.push(mtr_row("ЛЗК-2", "2024-01-11"));
    jan.push(mtr_row("ЛЗК-3", "2024-01-12"));
    write_ods(&input.path().join("jan.ods"), &jan);

    write_corrupt_ods(&input.path().join("feb.ods"));

    let mut mar = vec![mtr_header()];
    mar.push(mtr_row("ЛЗК-4", "2024-03-01"));
    mar.push(mtr_row("ЛЗК-5", "01.03.2024")); // invalid format, row skipped
    mar.push(mtr_row("ЛЗК-6", "2024-03-02"));
    write_ods(&input.path().join("mar.ods"), &mar);

    let mut conn = db::open_connection(db_path.to_str().unwrap()).unwrap();
    create_target_table(&conn, TABLE, false);

    let ctx = LoadContext::new("тест", Utc::now());
    let processor = FileProcessor::with_defaults();
    let summary = processor
        .run(&mut conn, &settings(input.path(), &db_path), &ctx)
        .unwrap();

    assert_eq!(summary.files_found, 3);
    assert_eq!(summary.files_processed, 3);
    assert_eq!(summary.total_rows_inserted, 5);
    assert_eq!(summary.files_contributing(), 2);
    assert_eq!(table_count(&conn), 5);

    // Lexicographic order: feb, jan, mar
    assert_eq!(summary.outcomes[0].file_name, "feb.ods");
    assert!(summary.outcomes[0].error.is_some());
    assert_eq!(summary.outcomes[0].rows_inserted, 0);

    assert_eq!(summary.outcomes[1].file_name, "jan.ods");
    assert_eq!(summary.outcomes[1].rows_read, 3);
    assert_eq!(summary.outcomes[1].rows_inserted, 3);

    assert_eq!(summary.outcomes[2].file_name, "mar.ods");
    assert_eq!(summary.outcomes[2].rows_read, 3);
    assert_eq!(summary.outcomes[2].rows_inserted, 2);
    assert!(summary.outcomes[2].error.is_none());
}

/// Provenance is per-file: every stored row carries its source file
/// name and the run's principal.
#[test]
fn test_provenance_written_per_file() {
    logging::init_test();

    let input = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("mtr.sqlite");

    let mut doc = vec![mtr_header()];
    doc.push(mtr_row("ЛЗК-1", "2024-01-10"));
    doc.push(mtr_row("ЛЗК-2", "2024-01-11"));
    write_ods(&input.path().join("apr.ods"), &doc);

    let mut conn = db::open_connection(db_path.to_str().unwrap()).unwrap();
    create_target_table(&conn, TABLE, false);

    let ctx = LoadContext::new("кладовщик", Utc::now());
    let processor = FileProcessor::with_defaults();
    processor
        .run(&mut conn, &settings(input.path(), &db_path), &ctx)
        .unwrap();

    let mut stmt = conn
        .prepare(&format!(
            "SELECT DISTINCT \"имя_файла\", \"кто_загрузил\" FROM \"{}\"",
            TABLE
        ))
        .unwrap();
    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(rows, vec![("apr.ods".to_string(), "кладовщик".to_string())]);
}

/// A batch failure in one file rolls back that file only; committed
/// rows from other files stay.
#[test]
fn test_per_file_isolation_on_insert_failure() {
    logging::init_test();

    let input = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("mtr.sqlite");

    let mut good = vec![mtr_header()];
    good.push(mtr_row("ЛЗК-1", "2024-01-10"));
    good.push(mtr_row("ЛЗК-2", "2024-01-11"));
    write_ods(&input.path().join("a_good.ods"), &good);

    // Internal duplicate violates the UNIQUE constraint mid-batch
    let mut bad = vec![mtr_header()];
    bad.push(mtr_row("ЛЗК-9", "2024-02-01"));
    bad.push(mtr_row("ЛЗК-9", "2024-02-02"));
    write_ods(&input.path().join("b_dup.ods"), &bad);

    let mut conn = db::open_connection(db_path.to_str().unwrap()).unwrap();
    create_target_table(&conn, TABLE, true);

    let ctx = LoadContext::new("тест", Utc::now());
    let processor = FileProcessor::with_defaults();
    let summary = processor
        .run(&mut conn, &settings(input.path(), &db_path), &ctx)
        .unwrap();

    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.total_rows_inserted, 2);

    assert_eq!(summary.outcomes[0].file_name, "a_good.ods");
    assert_eq!(summary.outcomes[0].rows_inserted, 2);
    assert_eq!(summary.outcomes[1].file_name, "b_dup.ods");
    assert_eq!(summary.outcomes[1].rows_inserted, 0);
    assert!(summary.outcomes[1].error.is_some());

    // No partial rows from the rolled-back batch
    assert_eq!(table_count(&conn), 2);
    let dup_rows: i64 = conn
        .query_row(
            &format!(
                "SELECT COUNT(*) FROM \"{}\" WHERE \"имя_файла\" = 'b_dup.ods'",
                TABLE
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(dup_rows, 0);
}

/// An empty document is "no data", not a failure.
#[test]
fn test_header_only_document_contributes_nothing() {
    logging::init_test();

    let input = tempfile::tempdir().unwrap();
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("mtr.sqlite");

    write_ods(&input.path().join("only_header.ods"), &[mtr_header()]);

    let mut conn = db::open_connection(db_path.to_str().unwrap()).unwrap();
    create_target_table(&conn, TABLE, false);

    let ctx = LoadContext::new("тест", Utc::now());
    let processor = FileProcessor::with_defaults();
    let summary = processor
        .run(&mut conn, &settings(input.path(), &db_path), &ctx)
        .unwrap();

    assert_eq!(summary.files_found, 1);
    assert_eq!(summary.total_rows_inserted, 0);
    assert!(summary.outcomes[0].error.is_none());
}

#[test]
fn test_missing_input_directory_is_fatal() {
    logging::init_test();

    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("mtr.sqlite");
    let mut conn = db::open_connection(db_path.to_str().unwrap()).unwrap();

    let ctx = LoadContext::new("тест", Utc::now());
    let processor = FileProcessor::with_defaults();
    let result = processor.run(
        &mut conn,
        &settings(Path::new("/нет/такой/папки"), &db_path),
        &ctx,
    );

    assert!(matches!(result, Err(LoadError::InputDirNotFound(_))));
}
