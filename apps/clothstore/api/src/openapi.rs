use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "ClothStore API",
        version = "0.1.0",
        description = "Catalog, addresses, orders and uploads for the ClothStore shop"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_users::handlers::ApiDoc),
        (path = "/addresses", api = domain_addresses::handlers::ApiDoc),
        (path = "/categories", api = domain_catalog::handlers::categories::ApiDoc),
        (path = "/products", api = domain_catalog::handlers::products::ApiDoc),
        (path = "/orders", api = domain_orders::handlers::ApiDoc),
        (path = "/uploads", api = domain_uploads::handlers::ApiDoc)
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_domain() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for prefix in ["/auth", "/addresses", "/categories", "/products", "/orders", "/uploads"] {
            assert!(
                paths.iter().any(|p| p.starts_with(prefix)),
                "no paths under {prefix}: {paths:?}"
            );
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("ErrorResponse"));
    }
}
