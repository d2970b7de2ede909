pub mod u501_migrate_store;
pub mod u502_dedupe_products;
pub mod u503_import_products_csv;
pub mod u504_seed_catalog;
pub mod u505_cleanup_demo_products;
