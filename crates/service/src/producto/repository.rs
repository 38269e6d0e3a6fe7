use async_trait::async_trait;

use crate::errors::ServiceError;
use super::{Draft, Producto};

/// Persistence contract for productos, keyed by integer id.
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    /// Every stored producto in insertion order.
    async fn find_all(&self) -> Result<Vec<Producto>, ServiceError>;
    /// `Ok(None)` when the id is unknown.
    async fn find_by_id(&self, id: i64) -> Result<Option<Producto>, ServiceError>;
    /// Insert when `draft.id` is `None`, otherwise overwrite the row with that id.
    async fn save(&self, draft: Draft) -> Result<Producto, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    /// Removing an unknown id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        by_id: BTreeMap<i64, Producto>,
        last_id: i64,
    }

    /// Map-backed store; ids are handed out sequentially starting at 1.
    #[derive(Default)]
    pub struct InMemoryProductoRepository {
        rows: Mutex<Rows>,
        failing: bool,
    }

    impl InMemoryProductoRepository {
        /// A repository whose every call fails with a database error.
        pub fn failing() -> Self {
            Self { failing: true, ..Default::default() }
        }

        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            if self.failing {
                return Err(ServiceError::Db("storage unavailable".into()));
            }
            self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))
        }
    }

    #[async_trait]
    impl ProductoRepository for InMemoryProductoRepository {
        async fn find_all(&self) -> Result<Vec<Producto>, ServiceError> {
            Ok(self.rows()?.by_id.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Producto>, ServiceError> {
            Ok(self.rows()?.by_id.get(&id).cloned())
        }

        async fn save(&self, draft: Draft) -> Result<Producto, ServiceError> {
            let mut rows = self.rows()?;
            let id = match draft.id {
                Some(id) => id,
                None => rows.last_id + 1,
            };
            rows.last_id = rows.last_id.max(id);
            let p = Producto { id, nombre: draft.nombre, precio: draft.precio };
            rows.by_id.insert(id, p.clone());
            Ok(p)
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows()?.by_id.contains_key(&id))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.rows()?.by_id.remove(&id);
            Ok(())
        }
    }
}
