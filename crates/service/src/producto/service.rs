use std::sync::Arc;
use tracing::instrument;

use crate::errors::ServiceError;
use super::{Draft, Producto, ProductoRepository};

/// Catalog service; every method hands straight through to the repository.
pub struct ProductoService<R: ProductoRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductoRepository + ?Sized> ProductoService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(level = "debug", skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Producto>, ServiceError> { self.repo.find_all().await }

    #[instrument(level = "debug", skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Producto>, ServiceError> { self.repo.find_by_id(id).await }

    /// Insert or overwrite, depending on whether the draft carries an id.
    ///
    /// # Examples
    /// ```
    /// use service::producto::{Draft, ProductoService, repository::mock::InMemoryProductoRepository};
    /// use std::sync::Arc;
    /// let svc = ProductoService::new(Arc::new(InMemoryProductoRepository::default()));
    /// let p = tokio_test::block_on(svc.save(Draft::new("Widget", 9.99))).unwrap();
    /// assert_eq!(p.id, 1);
    /// assert_eq!(p.nombre, "Widget");
    /// ```
    #[instrument(level = "debug", skip(self), fields(id = ?draft.id))]
    pub async fn save(&self, draft: Draft) -> Result<Producto, ServiceError> { self.repo.save(draft).await }

    #[instrument(level = "debug", skip(self))]
    pub async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> { self.repo.exists_by_id(id).await }

    #[instrument(level = "debug", skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> { self.repo.delete_by_id(id).await }
}
