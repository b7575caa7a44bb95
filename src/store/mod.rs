//! In-memory stores for Taskshop.
//!
//! Both stores are plain owned values mutated through `&mut self`. Callers
//! that share a store across tasks wrap it in a lock; see `DaemonContext`.
//!
//! # Example
//!
//! ```
//! use taskshop::domain::{NewProduct, ProductFilter, Task};
//! use taskshop::store::{ProductStore, TaskStore};
//!
//! let mut tasks = TaskStore::new();
//! tasks.insert(Task::new(1, "Write report", false)).unwrap();
//!
//! let mut products = ProductStore::new();
//! products.insert(NewProduct::new("Pen", "Office", 2.0));
//! let cheap = products.list_filtered(&ProductFilter::default().price_max(10.0));
//! assert_eq!(cheap.len(), 1);
//! ```

mod product_store;
mod task_store;

pub use product_store::ProductStore;
pub use task_store::TaskStore;
