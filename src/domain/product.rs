//! Product record and catalog filter types

use serde::{Deserialize, Serialize};

/// A stored product; `id` is assigned by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// A validated product that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }

    /// Attach the store-assigned id
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}

/// One side of a price range filter
#[derive(Debug, Clone, PartialEq)]
pub enum PriceBound {
    Value(f64),
    /// The query value did not parse as a number; matches no product
    Unparsable(String),
}

impl PriceBound {
    /// Parse a query value, keeping the raw text when it is not a number
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if !v.is_nan() => PriceBound::Value(v),
            _ => PriceBound::Unparsable(raw.to_string()),
        }
    }
}

/// Composable catalog filter; absent fields do not constrain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub price_min: Option<PriceBound>,
    pub price_max: Option<PriceBound>,
}

impl ProductFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_min(mut self, min: f64) -> Self {
        self.price_min = Some(PriceBound::Value(min));
        self
    }

    pub fn price_max(mut self, max: f64) -> Self {
        self.price_max = Some(PriceBound::Value(max));
        self
    }

    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.price_min.is_none() && self.price_max.is_none()
    }

    /// Category (case-insensitive), then lower bound, then upper bound; all inclusive
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category.to_lowercase() != category.to_lowercase()
        {
            return false;
        }
        match &self.price_min {
            Some(PriceBound::Value(min)) if product.price < *min => return false,
            Some(PriceBound::Unparsable(_)) => return false,
            _ => {}
        }
        match &self.price_max {
            Some(PriceBound::Value(max)) if product.price > *max => return false,
            Some(PriceBound::Unparsable(_)) => return false,
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(category: &str, price: f64) -> Product {
        NewProduct::new("item", category, price).into_product(1)
    }

    #[test]
    fn test_category_match_ignores_case() {
        let filter = ProductFilter::default().category("Electronics");
        for category in ["electronics", "ELECTRONICS", "Electronics"] {
            assert!(filter.matches(&product(category, 5.0)));
        }
        assert!(!filter.matches(&product("Office", 5.0)));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let filter = ProductFilter::default().price_min(10.0).price_max(20.0);
        assert!(filter.matches(&product("x", 10.0)));
        assert!(filter.matches(&product("x", 20.0)));
        assert!(!filter.matches(&product("x", 9.99)));
        assert!(!filter.matches(&product("x", 20.01)));
    }

    #[test]
    fn test_unparsable_bound_matches_nothing() {
        let filter = ProductFilter {
            price_min: Some(PriceBound::parse("cheap")),
            ..Default::default()
        };
        assert!(!filter.matches(&product("x", 0.0)));
        assert!(!filter.matches(&product("x", 1e9)));
    }

    #[test]
    fn test_price_bound_parse() {
        assert_eq!(PriceBound::parse(" 12.5 "), PriceBound::Value(12.5));
        assert_eq!(PriceBound::parse("NaN"), PriceBound::Unparsable("NaN".to_string()));
        assert_eq!(PriceBound::parse("abc"), PriceBound::Unparsable("abc".to_string()));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ProductFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&product("anything", -3.0)));
    }
}
