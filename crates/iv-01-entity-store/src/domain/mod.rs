//! Domain layer for the Entity Store
//!
//! Pure state transitions over the primary maps and their secondary indexes.
//! No locking here; the service wraps `StoreState` in a single `RwLock`.

pub mod state;

pub use state::StoreState;
