//! In-memory product catalog.
//!
//! Products are immutable once stored. Ids come from a counter that only
//! moves forward, so an id is never handed out twice.

use log::debug;

use crate::domain::{NewProduct, Product, ProductFilter};

/// ProductStore holds catalog entries in insertion order.
#[derive(Debug)]
pub struct ProductStore {
    products: Vec<Product>,
    next_id: u64,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            next_id: 1,
        }
    }
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a validated product under the next sequential id.
    pub fn insert(&mut self, product: NewProduct) -> Product {
        let product = product.into_product(self.next_id);
        self.next_id += 1;
        debug!("Inserted product {} ({})", product.id, product.name);
        self.products.push(product.clone());
        product
    }

    /// Products matching every filter that is set, in insertion order.
    pub fn list_filtered(&self, filter: &ProductFilter) -> Vec<Product> {
        self.products.iter().filter(|p| filter.matches(p)).cloned().collect()
    }

    /// All products in insertion order.
    pub fn list_all(&self) -> Vec<Product> {
        self.products.clone()
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
    use crate::domain::PriceBound;

    fn pen_and_desk() -> ProductStore {
        let mut store = ProductStore::new();
        store.insert(NewProduct::new("Pen", "Office", 2.0));
        store.insert(NewProduct::new("Desk", "Office", 150.0));
        store
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut store = ProductStore::new();
        for n in 1..=5u64 {
            let product = store.insert(NewProduct::new(format!("p{}", n), "c", n as f64));
            assert_eq!(product.id, n);
        }
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_no_filter_returns_everything_in_order() {
        let store = pen_and_desk();
        let names: Vec<String> = store
            .list_filtered(&ProductFilter::default())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Pen", "Desk"]);
    }

    #[test]
    fn test_category_and_max_price() {
        let store = pen_and_desk();
        let filter = ProductFilter::default().category("office").price_max(10.0);
        let found = store.list_filtered(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Pen");
    }

    #[test]
    fn test_price_range_inclusive() {
        let mut store = ProductStore::new();
        for price in [5.0, 10.0, 15.0, 20.0, 25.0] {
            store.insert(NewProduct::new("p", "c", price));
        }
        let filter = ProductFilter::default().price_min(10.0).price_max(20.0);
        let prices: Vec<f64> = store.list_filtered(&filter).into_iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_unparsable_bound_yields_empty_listing() {
        let store = pen_and_desk();
        let filter = ProductFilter {
            price_max: Some(PriceBound::Unparsable("lots".into())),
            ..Default::default()
        };
        assert!(store.list_filtered(&filter).is_empty());
    }

    #[test]
    fn test_filtering_does_not_mutate_store() {
        let store = pen_and_desk();
        let _ = store.list_filtered(&ProductFilter::default().category("none"));
        assert_eq!(store.list_all().len(), 2);
    }
}
