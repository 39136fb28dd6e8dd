//! HTTP-level tests for the catalog routes

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig, Role, optional_jwt_auth_middleware};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDatabase;
use tower::ServiceExt;
use uuid::Uuid;

fn jwt() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("catalog-secret-catalog-secret-catalog!"))
}

fn app(db: &TestDatabase) -> Router {
    let categories = CategoryService::new(PgCategoryRepository::new(db.connection()));
    let products = ProductService::new(PgProductRepository::new(db.connection()));
    let images = ProductImageService::new(PgProductImageRepository::new(db.connection()));

    Router::new()
        .nest("/categories", handlers::categories::router(categories))
        .nest("/products", handlers::products::router(products, images))
        .layer(axum::middleware::from_fn_with_state(
            jwt(),
            optional_jwt_auth_middleware,
        ))
}

fn token(role: Role) -> String {
    jwt()
        .create_access_token(Uuid::now_v7(), "someone@example.com", "someone", &[role])
        .unwrap()
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_writes_require_admin() {
    let db = TestDatabase::new().await;
    let app = app(&db);
    let body = json!({"name": "Knitwear"});

    let res = app
        .clone()
        .oneshot(post_json("/categories", body.clone(), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let customer = token(Role::Customer);
    let res = app
        .clone()
        .oneshot(post_json("/categories", body.clone(), Some(&customer)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = token(Role::Admin);
    let res = app
        .oneshot(post_json("/categories", body, Some(&admin)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(json_body(res.into_body()).await["name"], "Knitwear");
}

#[tokio::test]
async fn test_product_lifecycle_over_http() {
    let db = TestDatabase::new().await;
    let app = app(&db);
    let admin = token(Role::Admin);

    let res = app
        .clone()
        .oneshot(post_json("/categories", json!({"name": "Boots"}), Some(&admin)))
        .await
        .unwrap();
    let category_id = json_body(res.into_body()).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let res = app
        .clone()
        .oneshot(post_json(
            "/products",
            json!({
                "name": "Desert boot",
                "price": "120.00",
                "stock_quantity": 7,
                "category_id": category_id,
            }),
            Some(&admin),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app
        .clone()
        .oneshot(Request::get("/products/search?q=DESERT").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let found = json_body(res.into_body()).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Desert boot");
    assert_eq!(found[0]["category"]["name"], "Boots");
    assert_eq!(found[0]["images"], json!([]));

    let res = app
        .oneshot(
            Request::get(format!("/products/by-category/{category_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(json_body(res.into_body()).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_search_is_400() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    for uri in ["/products/search", "/products/search?q=%20%20"] {
        let res = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_invalid_product_is_rejected() {
    let db = TestDatabase::new().await;
    let app = app(&db);
    let admin = token(Role::Admin);

    let res = app
        .oneshot(post_json(
            "/products",
            json!({
                "name": "Freebie",
                "price": "0",
                "stock_quantity": 1,
                "category_id": Uuid::now_v7(),
            }),
            Some(&admin),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_product_and_bad_id() {
    let db = TestDatabase::new().await;
    let app = app(&db);

    let res = app
        .clone()
        .oneshot(
            Request::get(format!("/products/{}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .oneshot(Request::get("/products/not-a-uuid").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
