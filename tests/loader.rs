//! File-loading integration tests: real files on disk, every supported
//! encoding and format, and the fatal error cases.

use catalogo::{load_catalog, CatalogError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write fixture");
    path
}

#[test]
fn loads_utf8_json_array() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "stock.json",
        br#"[
            {"Name": "Jogger Negro - Talla M", "SKU": "JG-01", "Stock": "4",
             "Regular price": "89900", "Thumbnail ID": "https://example.com/a.jpg",
             "Attribute pa color": "Negro", "Attribute pa talla": "M"},
            {"Name": "Camiseta Blanca", "SKU": "CM-02", "Stock": "0"}
        ]"#,
    );

    let records = load_catalog(&path).expect("load json");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Jogger Negro - Talla M");
    assert_eq!(records[0].sku, "JG-01");
    assert_eq!(records[0].regular_price, "89900");
    assert_eq!(records[0].color, "Negro");
    assert_eq!(records[0].size, "M");
    assert!(records[0].is_in_stock());
    assert!(!records[1].is_in_stock());
}

#[test]
fn loads_json_with_utf8_bom() {
    let dir = TempDir::new().unwrap();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(r#"[{"Name": "Hoodie Café", "Stock": "1"}]"#.as_bytes());
    let path = write_fixture(&dir, "bom.json", &bytes);

    let records = load_catalog(&path).expect("load bom json");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Hoodie Café");
}

#[test]
fn loads_latin1_csv() {
    let dir = TempDir::new().unwrap();
    // "Categoría" with a latin-1 í (0xED) — invalid as UTF-8, so the loader
    // must fall through to the latin-1 candidate.
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"Name,Stock,Categor\xeda\n");
    bytes.extend_from_slice(b"Pantaloneta Caf\xe9,3,Ropa\n");
    let path = write_fixture(&dir, "stock.csv", &bytes);

    let records = load_catalog(&path).expect("load latin-1 csv");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Pantaloneta Café");
    assert_eq!(records[0].stock, "3");
    assert_eq!(records[0].extra.get("categoría").map(String::as_str), Some("Ropa"));
}

#[test]
fn csv_columns_map_positionally_against_headers() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "stock.csv",
        b"SKU,Name,Attribute pa talla,Stock\nHD-9,Hoodie Oversize Gris,XL,2\n",
    );

    let records = load_catalog(&path).expect("load csv");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sku, "HD-9");
    assert_eq!(records[0].name, "Hoodie Oversize Gris");
    assert_eq!(records[0].size, "XL");
    assert_eq!(records[0].stock, "2");
}

#[test]
fn header_keys_are_normalized() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "stock.json",
        br#"[{"  Regular Price  ": "59900", "THUMBNAIL id": "x.jpg", "name": "A"}]"#,
    );

    let records = load_catalog(&path).expect("load");
    assert_eq!(records[0].regular_price, "59900");
    assert_eq!(records[0].thumbnail_id, "x.jpg");
}

#[test]
fn non_string_json_scalars_are_stringified() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "stock.json",
        br#"[{"Name": "A", "Stock": 7, "Regular price": 89.9, "Thumbnail ID": null}]"#,
    );

    let records = load_catalog(&path).expect("load");
    assert_eq!(records[0].stock, "7");
    assert_eq!(records[0].regular_price, "89.9");
    assert_eq!(records[0].thumbnail_id, "");
    assert!(records[0].is_in_stock());
}

#[test]
fn unsupported_extension_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "stock.xlsx", b"whatever");

    let err = load_catalog(&path).unwrap_err();
    match err {
        // The extension carries its dot, as in the user-facing message.
        CatalogError::UnsupportedFormat { extension } => assert_eq!(extension, ".xlsx"),
        other => panic!("expected UnsupportedFormat, got {other}"),
    }
}

#[test]
fn extensionless_path_reports_empty_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "stock", b"[]");

    let err = load_catalog(&path).unwrap_err();
    match err {
        CatalogError::UnsupportedFormat { extension } => assert_eq!(extension, ""),
        other => panic!("expected UnsupportedFormat, got {other}"),
    }
}

#[test]
fn missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_catalog(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::FileNotFound { .. }));
}

#[test]
fn malformed_json_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "bad.json", b"{\"not\": \"an array\"");

    let err = load_catalog(&path).unwrap_err();
    assert!(matches!(err, CatalogError::JsonParse { .. }));
}
