use sea_orm::{
    entity::prelude::*, sea_query::OnConflict, ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "producto")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A producto on its way to the store; `id: None` means "not persisted yet".
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub id: Option<i64>,
    pub nombre: String,
    pub precio: f64,
}

impl Draft {
    pub fn new(nombre: impl Into<String>, precio: f64) -> Self {
        Self { id: None, nombre: nombre.into(), precio }
    }
}

impl From<Model> for Draft {
    fn from(m: Model) -> Self {
        Self { id: Some(m.id), nombre: m.nombre, precio: m.precio }
    }
}

/// Non-null and not blank once leading and trailing chars `<= ' '` are stripped.
/// Unicode spaces such as U+00A0 count as content.
pub fn is_valid_nombre(nombre: Option<&str>) -> bool {
    nombre.is_some_and(|n| !n.trim_matches(|c: char| c <= ' ').is_empty())
}

/// Non-null and strictly positive.
pub fn is_valid_precio(precio: Option<f64>) -> bool {
    precio.is_some_and(|p| p > 0.0)
}

/// All rows in insertion order.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert a draft without id, or insert-or-overwrite the row carrying the draft's id.
pub async fn save(db: &DatabaseConnection, draft: Draft) -> Result<Model, errors::ModelError> {
    let Some(id) = draft.id else {
        let am = ActiveModel {
            nombre: Set(draft.nombre),
            precio: Set(draft.precio),
            ..Default::default()
        };
        return am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()));
    };

    let am = ActiveModel {
        id: Set(id),
        nombre: Set(draft.nombre),
        precio: Set(draft.precio),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::Nombre, Column::Precio])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let n = Entity::find_by_id(id)
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(n > 0)
}

/// Delete by id; returns the number of rows removed (0 when absent).
pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
