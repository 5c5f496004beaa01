pub mod csv;
pub mod record;
pub mod task_store;

pub use task_store::{StoreError, TaskStore};
