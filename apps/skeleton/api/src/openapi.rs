use utoipa::OpenApi;

/// Host API documentation. Plugin docs are nested under their mount point.
#[derive(OpenApi)]
#[openapi(
    info(title = "Skeleton API", description = "Per-user item management"),
    nest(
        (path = "/api/skeleton", api = domain_skeleton::ApiDoc)
    )
)]
pub struct ApiDoc;
