//! Payload checks for store operations
//!
//! Every function here is pure: it inspects an untyped JSON payload and
//! either produces the typed record the store expects or a rejection.

use log::{debug, warn};
use serde_json::Value;

use crate::domain::{NewProduct, PriceBound, ProductFilter, Task, TaskId, TaskPatch};
use crate::error::ValidationError;

pub const TASK_CREATE_REQUIRED: &str = "id, title and completed(boolean) required";
pub const PRODUCT_CREATE_REQUIRED: &str = "name, category and price(number) required";
pub const TASK_ID_REQUIRED: &str = "Missing 'id' parameter";

fn non_empty_text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Validate a task creation payload `{id, title, completed}`.
pub fn task_create(params: &Value) -> Result<Task, ValidationError> {
    let id = TaskId::from_value(&params["id"]);
    let title = non_empty_text(&params["title"]);
    let completed = params["completed"].as_bool();

    match (id, title, completed) {
        (Some(id), Some(title), Some(completed)) => Ok(Task::new(id, title, completed)),
        _ => Err(ValidationError::new(TASK_CREATE_REQUIRED)),
    }
}

/// Extract the fields of a task update; invalid fields are dropped, never rejected.
pub fn task_update(params: &Value) -> TaskPatch {
    let title = match params.get("title") {
        Some(value) => {
            let title = non_empty_text(value).map(str::to_string);
            if title.is_none() {
                debug!("Ignoring invalid title in task update: {}", value);
            }
            title
        }
        None => None,
    };

    let completed = match params.get("completed") {
        Some(value) => {
            let completed = value.as_bool();
            if completed.is_none() {
                debug!("Ignoring non-boolean completed in task update: {}", value);
            }
            completed
        }
        None => None,
    };

    TaskPatch { title, completed }
}

/// Resolve the task id addressed by an update or delete.
pub fn task_path_id(params: &Value) -> Result<TaskId, ValidationError> {
    TaskId::from_value(&params["id"]).ok_or_else(|| ValidationError::new(TASK_ID_REQUIRED))
}

/// Validate a product creation payload `{name, category, price}`.
pub fn product_create(params: &Value) -> Result<NewProduct, ValidationError> {
    let name = non_empty_text(&params["name"]);
    let category = non_empty_text(&params["category"]);
    let price = params["price"].as_f64();

    match (name, category, price) {
        (Some(name), Some(category), Some(price)) => Ok(NewProduct::new(name, category, price)),
        _ => Err(ValidationError::new(PRODUCT_CREATE_REQUIRED)),
    }
}

fn price_bound(params: &Value, key: &str) -> Option<PriceBound> {
    let bound = match params.get(key)? {
        Value::Null => return None,
        Value::String(s) if s.is_empty() => return None,
        Value::String(s) => PriceBound::parse(s),
        Value::Number(n) => match n.as_f64() {
            Some(v) => PriceBound::Value(v),
            None => PriceBound::Unparsable(n.to_string()),
        },
        other => PriceBound::Unparsable(other.to_string()),
    };
    if let PriceBound::Unparsable(raw) = &bound {
        warn!("Unparsable {} filter {:?}; it will match no product", key, raw);
    }
    Some(bound)
}

/// Build a catalog filter from query parameters `{category?, priceMin?, priceMax?}`.
pub fn product_filter(params: &Value) -> ProductFilter {
    ProductFilter {
        category: non_empty_text(&params["category"]).map(str::to_string),
        price_min: price_bound(params, "priceMin"),
        price_max: price_bound(params, "priceMax"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_create_valid() {
        let task = task_create(&json!({"id": 1, "title": "A", "completed": false})).unwrap();
        assert_eq!(task, Task::new(1, "A", false));
    }

    #[test]
    fn test_task_create_rejections() {
        let cases = [
            json!({"title": "A", "completed": false}),
            json!({"id": null, "title": "A", "completed": false}),
            json!({"id": "", "title": "A", "completed": false}),
            json!({"id": 1, "completed": false}),
            json!({"id": 1, "title": "", "completed": false}),
            json!({"id": 1, "title": 5, "completed": false}),
            json!({"id": 1, "title": "A"}),
            json!({"id": 1, "title": "A", "completed": "true"}),
            json!({"id": 1, "title": "A", "completed": 0}),
            json!("not an object"),
        ];
        for payload in cases {
            let err = task_create(&payload).unwrap_err();
            assert_eq!(err.message, TASK_CREATE_REQUIRED, "payload {}", payload);
        }
    }

    #[test]
    fn test_task_update_fields_independent() {
        let patch = task_update(&json!({"title": "", "completed": true}));
        assert_eq!(patch.title, None);
        assert_eq!(patch.completed, Some(true));

        let patch = task_update(&json!({"title": "New", "completed": "yes"}));
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.completed, None);
    }

    #[test]
    fn test_task_update_non_object_is_empty() {
        assert!(task_update(&json!(null)).is_empty());
        assert!(task_update(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_task_path_id() {
        assert_eq!(task_path_id(&json!({"id": "7"})).unwrap(), TaskId::Int(7));
        assert_eq!(task_path_id(&json!({"id": "abc"})).unwrap(), TaskId::Text("abc".into()));
        assert_eq!(task_path_id(&json!({})).unwrap_err().message, TASK_ID_REQUIRED);
    }

    #[test]
    fn test_product_create_valid() {
        let product = product_create(&json!({"name": "Pen", "category": "Office", "price": 2})).unwrap();
        assert_eq!(product, NewProduct::new("Pen", "Office", 2.0));
    }

    #[test]
    fn test_product_create_negative_price_accepted() {
        let product = product_create(&json!({"name": "Refund", "category": "Misc", "price": -5.5})).unwrap();
        assert_eq!(product.price, -5.5);
    }

    #[test]
    fn test_product_create_rejections() {
        let cases = [
            json!({"category": "Office", "price": 2}),
            json!({"name": "Pen", "category": "", "price": 2}),
            json!({"name": "Pen", "category": "Office", "price": "2"}),
            json!({"name": "Pen", "category": "Office"}),
        ];
        for payload in cases {
            let err = product_create(&payload).unwrap_err();
            assert_eq!(err.message, PRODUCT_CREATE_REQUIRED, "payload {}", payload);
        }
    }

    #[test]
    fn test_product_filter_from_query_text() {
        let filter = product_filter(&json!({"category": "office", "priceMin": "10", "priceMax": "20.5"}));
        assert_eq!(filter.category.as_deref(), Some("office"));
        assert_eq!(filter.price_min, Some(PriceBound::Value(10.0)));
        assert_eq!(filter.price_max, Some(PriceBound::Value(20.5)));
    }

    #[test]
    fn test_product_filter_empty_values_are_absent() {
        let filter = product_filter(&json!({"category": "", "priceMin": "", "priceMax": null}));
        assert!(filter.is_empty());
        assert!(product_filter(&json!({})).is_empty());
    }

    #[test]
    fn test_product_filter_accepts_numbers() {
        let filter = product_filter(&json!({"priceMax": 10}));
        assert_eq!(filter.price_max, Some(PriceBound::Value(10.0)));
    }

    #[test]
    fn test_product_filter_unparsable_kept() {
        let filter = product_filter(&json!({"priceMin": "ten"}));
        assert_eq!(filter.price_min, Some(PriceBound::Unparsable("ten".to_string())));
    }
}
