//! Create `producto` table.
//! Sole catalog entity; the id is assigned by the database.
use sea_orm_migration::{prelude::*, schema::*, sea_orm::DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite only auto-increments INTEGER PRIMARY KEY, which is already 64-bit
        let id = match manager.get_database_backend() {
            DatabaseBackend::Sqlite => pk_auto(Producto::Id),
            _ => big_integer(Producto::Id).auto_increment().primary_key().take(),
        };
        manager
            .create_table(
                Table::create()
                    .table(Producto::Table)
                    .if_not_exists()
                    .col(id)
                    .col(string_len(Producto::Nombre, 255).not_null())
                    .col(double(Producto::Precio).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Producto::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Producto { Table, Id, Nombre, Precio }
