//! Producto module: repository abstraction, SeaORM backing, and the service on top.

pub mod repository;
pub mod repo;
pub mod service;

pub use models::producto::{Draft, Model as Producto};
pub use repository::ProductoRepository;
pub use service::ProductoService;
