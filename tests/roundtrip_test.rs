//! Integration tests for writing catalogs back to `.ts` files

mod helpers;

use tscatalog::{Catalog, CatalogBuilder, Message};

use helpers::*;

#[test]
fn test_shipped_catalog_round_trips_byte_for_byte() {
    init_test_env();
    let original = std::fs::read_to_string(danish_catalog_path()).unwrap();
    let catalog = Catalog::parse(&original).unwrap();
    assert_eq!(catalog.to_ts_string(), original);
}

#[test]
fn test_sample_round_trips_byte_for_byte() {
    let catalog = Catalog::parse(sample_ts()).unwrap();
    assert_eq!(catalog.to_ts_string(), sample_ts());
}

#[test]
fn test_write_then_load() {
    let dir = TranslationsDir::new(&[]).unwrap();
    let path = dir.path().join("out.ts");

    let catalog = Catalog::parse(sample_ts()).unwrap();
    catalog.write(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), sample_ts());
    assert_eq!(Catalog::load(&path).unwrap(), catalog);
}

#[test]
fn test_non_canonical_input_is_normalized() {
    let compact = "<?xml version=\"1.0\"?><TS version=\"2.0\" language=\"da_DK\">\
        <context><name>app</name><message><source>Part</source>\
        <translation>Emne</translation></message></context></TS>";
    let catalog = Catalog::parse(compact).unwrap();

    let written = catalog.to_ts_string();
    assert!(written.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n<!DOCTYPE TS>\n<TS language=\"da_DK\" version=\"2.0\">\n"));
    assert_eq!(Catalog::parse(&written).unwrap(), catalog);
    assert_eq!(Catalog::parse(&written).unwrap().to_ts_string(), written);
}

#[test]
fn test_built_catalog_escapes_markup() {
    let mut builder = CatalogBuilder::new();
    builder.language("da_DK").source_language("en").version("2.0");
    builder
        .add_message("model", Message::new("Length < 10 & > 2", "Længde < 10 & > 2"))
        .unwrap();
    let written = builder.build().to_ts_string();

    assert!(written.contains("<source>Length &lt; 10 &amp; &gt; 2</source>"));
    assert_eq!(Catalog::parse(&written).unwrap().lookup("model", "Length < 10 & > 2"), "Længde < 10 & > 2");
}
