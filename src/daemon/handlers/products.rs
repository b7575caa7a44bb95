//! Product request handlers

use log::info;
use serde_json::{Value, json};

use crate::daemon::context::DaemonContext;
use crate::ipc::messages::{DaemonEvent, DaemonResponse};
use crate::validation;

/// Handle product.create - add a product under the next id
pub async fn handle_product_create(id: u64, params: &Value, ctx: &DaemonContext) -> DaemonResponse {
    let new_product = match validation::product_create(params) {
        Ok(product) => product,
        Err(e) => return DaemonResponse::error(id, e.into()),
    };

    let product = ctx.products.write().await.insert(new_product);
    info!("Created product {} ({})", product.id, product.name);
    ctx.broadcast(DaemonEvent::product_created(&product));
    DaemonResponse::created(id, json!(product))
}

/// Handle product.list - catalog listing with optional filters
pub async fn handle_product_list(id: u64, params: &Value, ctx: &DaemonContext) -> DaemonResponse {
    let filter = validation::product_filter(params);
    let products = ctx.products.read().await.list_filtered(&filter);
    DaemonResponse::success(id, json!(products))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::messages::Status;

    async fn seed(ctx: &DaemonContext) {
        handle_product_create(1, &json!({"name": "Pen", "category": "Office", "price": 2}), ctx).await;
        handle_product_create(2, &json!({"name": "Desk", "category": "Office", "price": 150}), ctx).await;
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let ctx = DaemonContext::standalone();
        let resp = handle_product_create(1, &json!({"name": "Pen", "category": "Office", "price": 2}), &ctx).await;
        assert_eq!(resp.status, Status::CREATED);
        let body = resp.result.unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["price"], 2.0);
    }

    #[tokio::test]
    async fn test_create_invalid() {
        let ctx = DaemonContext::standalone();
        let resp = handle_product_create(1, &json!({"name": "Pen", "price": 2}), &ctx).await;
        assert_eq!(resp.status, Status::BAD_REQUEST);
        assert!(ctx.products.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_with_category_and_max() {
        let ctx = DaemonContext::standalone();
        seed(&ctx).await;
        let resp = handle_product_list(3, &json!({"category": "office", "priceMax": "10"}), &ctx).await;
        let body = resp.result.unwrap();
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Pen");
    }

    #[tokio::test]
    async fn test_list_without_filters() {
        let ctx = DaemonContext::standalone();
        seed(&ctx).await;
        let resp = handle_product_list(3, &json!({}), &ctx).await;
        assert_eq!(resp.status, Status::OK);
        assert_eq!(resp.result.unwrap().as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_with_unparsable_min() {
        let ctx = DaemonContext::standalone();
        seed(&ctx).await;
        let resp = handle_product_list(3, &json!({"priceMin": "abc"}), &ctx).await;
        assert_eq!(resp.status, Status::OK);
        assert_eq!(resp.result.unwrap(), json!([]));
    }
}
