//! Pipeline integration tests: loading through indexing, plus a render run
//! where every image fetch fails and the catalog must still be produced.

use catalogo::{
    build_index, load_catalog, render_bucket, CatalogConfig, CatalogError, ProductRecord,
};
use std::fs;
use tempfile::TempDir;

fn record(name: &str, size: &str, stock: &str, url: &str) -> ProductRecord {
    ProductRecord {
        name: name.to_string(),
        sku: format!("SKU-{}", name.len()),
        stock: stock.to_string(),
        size: size.to_string(),
        color: "Negro".to_string(),
        regular_price: "89900".to_string(),
        thumbnail_id: url.to_string(),
        ..Default::default()
    }
}

#[test]
fn index_excludes_out_of_stock_and_groups_by_category_and_size() {
    let config = CatalogConfig::default();
    let records = vec![
        record("Hoodie Oversize Fit - Negro", "M", "3", ""),
        record("Jogger Negro", "M", "0", ""),
        record("Jogger Gris", "M", "2", ""),
        record("Jogger Azul", "L", "1", ""),
    ];

    let index = build_index(records, &config);

    // "Hoodie Oversize Fit" matches the Hoodie Oversize rule; the zero-stock
    // Jogger never enters the index.
    assert_eq!(index.categories(), vec!["Hoodie Oversize", "Jogger"]);
    assert_eq!(index.sizes("Jogger"), Some(vec!["M", "L"]));

    let bucket = index.select("Jogger", "M").expect("bucket exists");
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].name, "Jogger Gris");

    let err = index.select("Jogger", "XXL").unwrap_err();
    assert!(matches!(err, CatalogError::SelectionNotFound { .. }));
    assert!(err.to_string().contains("'Jogger'"));
    assert!(err.to_string().contains("'XXL'"));
}

#[test]
fn unmatched_products_fall_back_to_sin_categoria() {
    let config = CatalogConfig::default();
    let records = vec![record("Gorra Trucker", "U", "5", "")];

    let index = build_index(records, &config);
    assert_eq!(index.categories(), vec!["Sin categoría"]);
    assert!(index.select("Sin categoría", "U").is_ok());
}

#[test]
fn load_and_index_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stock.json");
    fs::write(
        &path,
        r#"[
            {"Name": "Camiseta Oversize Blanca", "Stock": "4",
             "Attribute pa talla": "M", "SKU": "C-1"},
            {"Name": "Camiseta Oversize Negra", "Stock": "",
             "Attribute pa talla": "M", "SKU": "C-2"},
            {"Name": "Pantaloneta Verde", "Stock": "2",
             "Attribute pa talla": "S", "SKU": "P-1"}
        ]"#,
    )
    .unwrap();

    let config = CatalogConfig::default();
    let records = load_catalog(&path).expect("load");
    let index = build_index(records, &config);

    assert_eq!(index.categories(), vec!["Camiseta Oversize", "Pantaloneta"]);
    let bucket = index.select("Camiseta Oversize", "M").unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].sku, "C-1");
}

#[test]
fn render_survives_every_image_failing() {
    // Port 1 on loopback refuses connections, so each fetch fails fast and
    // each record is skipped. The PDF must still be written.
    let dir = TempDir::new().unwrap();
    let config = CatalogConfig::builder()
        .output_dir(dir.path())
        .download_timeout_secs(2)
        .build()
        .unwrap();

    let records = vec![
        record("Jogger Negro - Clasico", "M", "3", "http://127.0.0.1:1/a.jpg"),
        record("Jogger Gris", "M", "1", "http://127.0.0.1:1/b.jpg"),
    ];

    let report = render_bucket(&records, "Jogger", "M", &config).expect("render");

    assert_eq!(report.pdf_path, dir.path().join("Jogger_M.pdf"));
    assert_eq!(report.stats.total_records, 2);
    assert_eq!(report.stats.rendered_records, 0);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].index, 0);
    assert_eq!(report.failures[0].name, "Jogger Negro");
    assert!(!report.is_complete());

    let bytes = fs::read(&report.pdf_path).expect("pdf exists");
    assert!(bytes.starts_with(b"%PDF"));

    // Nothing but the PDF in the output directory: no temp image files.
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn render_paginates_every_six_records() {
    let dir = TempDir::new().unwrap();
    let config = CatalogConfig::builder()
        .output_dir(dir.path())
        .download_timeout_secs(2)
        .build()
        .unwrap();

    // Seven records → two pages, even though all images fail.
    let records: Vec<ProductRecord> = (0..7)
        .map(|i| {
            record(
                &format!("Pantaloneta {i}"),
                "S",
                "1",
                "http://127.0.0.1:1/x.jpg",
            )
        })
        .collect();

    let report = render_bucket(&records, "Pantaloneta", "S", &config).expect("render");
    assert_eq!(report.stats.pages, 2);
    assert_eq!(report.stats.failed_records, 7);
}
