//! Text and JSON views of inventory entities

use serde::Serialize;

use super::table::Table;
use crate::domain::{Product, ProductCatalog, Warehouse};

/// One shelf line of a warehouse listing
#[derive(Debug, Serialize)]
pub struct ShelfRow<'a> {
    pub name: &'a str,
    pub sku: &'a str,
    pub qty: u64,
}

/// Warehouse details with its shelf, for JSON output
#[derive(Debug, Serialize)]
pub struct WarehouseView<'a> {
    #[serde(flatten)]
    pub warehouse: &'a Warehouse,
    pub shelf: Vec<ShelfRow<'a>>,
}

pub fn shelf_rows<'a>(warehouse: &'a Warehouse, catalog: &'a ProductCatalog) -> Vec<ShelfRow<'a>> {
    warehouse
        .shelf()
        .map(|(sku, qty)| ShelfRow {
            name: catalog.lookup(sku).map(|p| p.name.as_str()).unwrap_or_default(),
            sku,
            qty,
        })
        .collect()
}

pub fn products<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    Table::new()
        .column("ITEM NAME", |p: &Product| p.name.clone())
        .column("ITEM SKU", |p: &Product| p.sku.clone())
        .render(products)
}

pub fn warehouses<'a>(warehouses: impl IntoIterator<Item = &'a Warehouse>) -> String {
    Table::new()
        .column("WAREHOUSE ID", |w: &Warehouse| w.id().to_string())
        .column("TOTAL QTY", |w: &Warehouse| w.total_quantity().to_string())
        .column("LIMIT", |w: &Warehouse| w.limit().to_string())
        .render(warehouses)
}

/// Summary line, followed by the shelf table unless the warehouse is empty
pub fn warehouse(warehouse: &Warehouse, catalog: &ProductCatalog) -> String {
    let summary = warehouse.summary();
    if warehouse.is_empty() {
        return summary;
    }

    let rows = shelf_rows(warehouse, catalog);
    let table = Table::new()
        .column("ITEM NAME", |r: &ShelfRow| r.name.to_string())
        .column("ITEM SKU", |r: &ShelfRow| r.sku.to_string())
        .column("QTY", |r: &ShelfRow| r.qty.to_string())
        .render(&rows);

    format!("{}\n{}", summary, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Capacity;

    #[test]
    fn empty_warehouse_is_summary_only() {
        let catalog = ProductCatalog::new();
        let warehouse = Warehouse::new(1, Capacity::Limited(10));

        assert_eq!(super::warehouse(&warehouse, &catalog), "Warehouse #1 ( 0 / 10 )");
    }

    #[test]
    fn stocked_warehouse_lists_shelf() {
        let mut catalog = ProductCatalog::new();
        catalog.add("Big Box", "BB");
        let mut warehouse = Warehouse::new(2, Capacity::Unbounded);
        warehouse.stock("BB", 12);

        let rendered = super::warehouse(&warehouse, &catalog);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "Warehouse #2 ( 12 / inf )");
        assert_eq!(lines[2], "ITEM NAME | ITEM SKU | QTY");
        assert_eq!(lines[4], "Big Box   | BB       | 12 ");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn warehouse_listing_columns() {
        let first = Warehouse::new(1, Capacity::Limited(10));
        let second = Warehouse::new(22, Capacity::Unbounded);

        let rendered = warehouses([&first, &second]);
        assert!(rendered.contains("WAREHOUSE ID | TOTAL QTY | LIMIT"));
        assert!(rendered.contains("22           | 0         | inf  "));
    }
}
