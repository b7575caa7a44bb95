//! Request validation
//!
//! Stateless checks that run before any store operation. Stores assume
//! their input already passed through here.

pub mod request;

pub use request::{
    PRODUCT_CREATE_REQUIRED, TASK_CREATE_REQUIRED, TASK_ID_REQUIRED, product_create, product_filter, task_create,
    task_path_id, task_update,
};
