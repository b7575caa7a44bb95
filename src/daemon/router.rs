//! Method routing for the daemon
//!
//! The Dispatcher is the RequestHandler the IPC server drives: it maps a
//! method name onto the matching handler and formats the response.

use log::debug;
use serde_json::json;

use crate::daemon::context::DaemonContext;
use crate::daemon::handlers::{
    handle_product_create, handle_product_list, handle_task_create, handle_task_delete, handle_task_list,
    handle_task_update,
};
use crate::ipc::messages::{DaemonError, DaemonRequest, DaemonResponse, Methods};
use crate::ipc::server::RequestHandler;

pub struct Dispatcher {
    ctx: DaemonContext,
}

impl Dispatcher {
    pub fn new(ctx: DaemonContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DaemonContext {
        &self.ctx
    }

    pub async fn dispatch(&self, request: DaemonRequest) -> DaemonResponse {
        debug!("Dispatching {} (request {})", request.method, request.id);
        let id = request.id;
        let params = &request.params;
        let ctx = &self.ctx;

        match request.method.as_str() {
            Methods::PING => DaemonResponse::success(id, json!({"pong": true, "version": env!("CARGO_PKG_VERSION")})),
            Methods::INDEX => DaemonResponse::success(
                id,
                json!({"name": env!("CARGO_PKG_NAME"), "methods": Methods::ALL}),
            ),
            Methods::TASK_CREATE => handle_task_create(id, params, ctx).await,
            Methods::TASK_LIST => handle_task_list(id, ctx).await,
            Methods::TASK_UPDATE => handle_task_update(id, params, ctx).await,
            Methods::TASK_DELETE => handle_task_delete(id, params, ctx).await,
            Methods::PRODUCT_CREATE => handle_product_create(id, params, ctx).await,
            Methods::PRODUCT_LIST => handle_product_list(id, params, ctx).await,
            other => DaemonResponse::error(id, DaemonError::method_not_found(other)),
        }
    }
}

impl RequestHandler for Dispatcher {
    fn handle(&self, request: DaemonRequest) -> impl std::future::Future<Output = DaemonResponse> + Send {
        self.dispatch(request)
    }
}
