//! Product catalog
//!
//! Products are registered once and never change afterwards.

use indexmap::IndexMap;
use serde::Serialize;

/// A catalogued product
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
}

impl Product {
    pub fn new(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
        }
    }
}

/// Mapping from SKU to product, insert-if-absent only
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: IndexMap<String, Product>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product, returning false when the SKU is already taken.
    pub fn add(&mut self, name: &str, sku: &str) -> bool {
        if self.products.contains_key(sku) {
            return false;
        }
        self.products
            .insert(sku.to_string(), Product::new(sku, name));
        true
    }

    pub fn lookup(&self, sku: &str) -> Option<&Product> {
        self.products.get(sku)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.products.contains_key(sku)
    }

    /// Products in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_lookup() {
        let mut catalog = ProductCatalog::new();
        assert!(catalog.add("Widget", "W-1"));

        let product = catalog.lookup("W-1").unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.sku, "W-1");
        assert!(catalog.lookup("W-2").is_none());
    }

    #[test]
    fn duplicate_sku_keeps_first_product() {
        let mut catalog = ProductCatalog::new();
        assert!(catalog.add("Widget", "W-1"));
        assert!(!catalog.add("Gadget", "W-1"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("W-1").unwrap().name, "Widget");
    }

    #[test]
    fn iterates_in_insertion_order() {
        let mut catalog = ProductCatalog::new();
        catalog.add("Bolt", "b");
        catalog.add("Axle", "a");

        let skus: Vec<_> = catalog.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["b", "a"]);
    }
}
