use sea_orm::DatabaseConnection;

use models::producto;
use crate::errors::ServiceError;
use crate::producto::{Draft, Producto, ProductoRepository};

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmProductoRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductoRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductoRepository for SeaOrmProductoRepository {
    async fn find_all(&self) -> Result<Vec<Producto>, ServiceError> {
        Ok(producto::find_all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Producto>, ServiceError> {
        Ok(producto::find_by_id(&self.db, id).await?)
    }

    async fn save(&self, draft: Draft) -> Result<Producto, ServiceError> {
        Ok(producto::save(&self.db, draft).await?)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(producto::exists_by_id(&self.db, id).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        producto::delete_by_id(&self.db, id).await?;
        Ok(())
    }
}
