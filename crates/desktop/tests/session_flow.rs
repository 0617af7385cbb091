//! End-to-end flows: session operations against a real product file.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use stockroom_desktop::{AdminSession, SearchOutcome, Shell};
use stockroom_infra::{ErrorKind, FlatFileRepository, LoadPolicy, PersistenceError, StoreConfig};
use stockroom_products::Product;

fn data_file(dir: &TempDir) -> PathBuf {
    dir.path().join("product_data.txt")
}

fn open(path: &Path) -> AdminSession<FlatFileRepository> {
    AdminSession::open(FlatFileRepository::new(path)).unwrap()
}

#[test]
fn first_run_starts_empty_and_creates_file_on_first_change() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let mut session = open(&path);
    assert!(session.products().is_empty());
    assert!(!path.exists());

    session.add_product("Widget", "1.5", "10").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Widget,1.5,10\n");
}

#[test]
fn every_change_is_written_through() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    let mut session = open(&path);

    session.add_product("A", "1", "1").unwrap();
    session.add_product("B", "2.5", "2").unwrap();
    session.add_product("C", "3", "3").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "A,1.0,1\nB,2.5,2\nC,3.0,3\n"
    );

    assert_eq!(session.search("b").index(), Some(1));
    session.add_stock("5").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "A,1.0,1\nB,2.5,7\nC,3.0,3\n"
    );

    session.delete_stock().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "A,1.0,1\nC,3.0,3\n");

    session.select(1).unwrap();
    session.delete_stock().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "A,1.0,1\n");
}

#[test]
fn reopening_restores_the_same_table() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let expected = {
        let mut session = open(&path);
        session.add_product("Hammer", "250", "4").unwrap();
        session.add_product("Nails (box)", "0.75", "120").unwrap();
        session.add_product("Hammer", "199.99", "1").unwrap();
        session.select(0).unwrap();
        session.add_stock("-1").unwrap();
        session.products().to_vec()
    };

    let session = open(&path);
    assert_eq!(session.products(), expected.as_slice());
    assert_eq!(session.selected(), None);
}

#[test]
fn malformed_lines_are_skipped_on_load() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    fs::write(&path, "Widget,1.5,10\nGadget,2.0\n").unwrap();

    let session = open(&path);
    assert_eq!(
        session.products(),
        &[Product::new("Widget", 1.5, 10).unwrap()]
    );
}

#[test]
fn blank_name_record_does_not_block_startup() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    fs::write(&path, "Widget,1.5,10\n,2.0,3\nBolt,1.0,1\n").unwrap();

    let mut session = open(&path);
    let names: Vec<&str> = session.products().iter().map(Product::name).collect();
    assert_eq!(names, vec!["Widget", "Bolt"]);

    session.select(1).unwrap();
    session.add_stock("1").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Widget,1.5,10\nBolt,1.0,2\n");
}

#[test]
fn bad_number_aborts_strict_load_and_lenient_skips_it() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    fs::write(&path, "Widget,1.5,10\nGadget,two,3\n").unwrap();

    let err = AdminSession::open(FlatFileRepository::new(&path)).unwrap_err();
    assert!(matches!(err, PersistenceError::Parse { line: 2, .. }));

    let config = StoreConfig {
        data_file: path.clone(),
        load_policy: LoadPolicy::Lenient,
    };
    let session = AdminSession::open(config.repository()).unwrap();
    assert_eq!(session.products().len(), 1);

    // Nothing was rewritten by the failed or lenient loads.
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Widget,1.5,10\nGadget,two,3\n"
    );
}

#[test]
fn failed_save_keeps_change_in_memory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gone").join("product_data.txt");
    let mut session = open(&path);

    let err = session.add_product("Widget", "1.5", "10").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IoFailure);
    assert_eq!(session.products().len(), 1);
    assert!(session.service().has_unsaved_changes());
}

#[test]
fn search_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&data_file(&dir));
    session.add_product("Widget", "1.5", "10").unwrap();

    assert!(matches!(
        session.search("sprocket"),
        SearchOutcome::NotFound { .. }
    ));
    match session.search("") {
        SearchOutcome::Found { index, product } => {
            assert_eq!(index, 0);
            assert_eq!(product.name(), "Widget");
        }
        other => panic!("Expected Found, got {other:?}"),
    }
}

#[test]
fn shell_session_persists_changes() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    let mut session = open(&path);

    let script = "search widget\nyes\nWidget\n1.5\n10\nadd-stock 5\nlist\nquit\n";
    let mut shell = Shell::new(Cursor::new(script), Vec::new());
    shell.run(&mut session).unwrap();
    let out = String::from_utf8(shell.into_output()).unwrap();

    assert!(out.contains("Status: Product added successfully."));
    assert!(out.contains("Status: Stock added successfully."));
    assert_eq!(fs::read_to_string(&path).unwrap(), "Widget,1.5,15\n");
}
