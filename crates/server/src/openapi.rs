use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductoDoc {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
}

#[derive(utoipa::ToSchema)]
pub struct CreateProductoInputDoc {
    pub nombre: String,
    pub precio: f64,
}

#[derive(utoipa::ToSchema)]
pub struct UpdateProductoInputDoc {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::productos::list,
        crate::routes::productos::get,
        crate::routes::productos::create,
        crate::routes::productos::update,
        crate::routes::productos::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductoDoc,
            CreateProductoInputDoc,
            UpdateProductoInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "productos")
    )
)]
pub struct ApiDoc;
