//! Domain types for Taskshop
//!
//! - Task: caller-keyed work item with partial-update support
//! - Product: catalog entry with a store-assigned sequential id
//! - ProductFilter: category and price-range predicates for catalog listing

pub mod product;
pub mod task;

pub use product::{NewProduct, PriceBound, Product, ProductFilter};
pub use task::{IdParseError, Task, TaskId, TaskPatch};
