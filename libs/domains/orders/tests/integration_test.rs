//! Orders against a migrated SQLite database with a real catalog

use axum_helpers::{Actor, Role};
use domain_catalog::{
    AddProductImage, CategoryInput, CategoryService, PgCategoryRepository,
    PgProductImageRepository, PgProductRepository, Product, ProductImageService, ProductInput,
    ProductService,
};
use domain_orders::*;
use domain_uploads::{NewUpload, PgUploadRepository, UploadRepository};
use domain_users::{NewUser, PgUserRepository, UserRepository};
use regex::Regex;
use test_utils::{TestDatabase, assertions::*, money};
use uuid::Uuid;

fn service(db: &TestDatabase) -> OrderService<PgOrderRepository> {
    OrderService::new(PgOrderRepository::new(db.connection()))
}

async fn customer(db: &TestDatabase, username: &str) -> Actor {
    let user = PgUserRepository::new(db.connection())
        .create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            first_name: Some("Test".to_string()),
            last_name: None,
            role: Role::Customer,
        })
        .await
        .unwrap();
    Actor::customer(user.id)
}

async fn product(db: &TestDatabase, name: &str, price: &str) -> Product {
    let category = CategoryService::new(PgCategoryRepository::new(db.connection()))
        .create(CategoryInput {
            name: format!("{name} category"),
            description: None,
            parent_id: None,
            sort_order: 0,
            is_active: true,
        })
        .await
        .unwrap();

    ProductService::new(PgProductRepository::new(db.connection()))
        .create(ProductInput {
            name: name.to_string(),
            description: None,
            price: money(price),
            discount_price: None,
            stock_quantity: 100,
            sku: None,
            category_id: category.id,
            is_active: true,
            is_featured: false,
        })
        .await
        .unwrap()
}

fn checkout(items: &[(Uuid, i32, &str)], payment_method: Option<&str>) -> CreateOrder {
    CreateOrder {
        sub_total: money("19.98"),
        shipping_cost: money("4.99"),
        total: money("24.97"),
        notes: Some("Leave at the door".to_string()),
        payment_method: payment_method.map(str::to_string),
        items: items
            .iter()
            .map(|(product_id, quantity, unit_price)| CreateOrderItem {
                product_id: *product_id,
                quantity: *quantity,
                unit_price: money(unit_price),
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_create_order_with_line_totals_and_number() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = customer(&db, "alice").await;
    let shirt = product(&db, "Shirt", "9.99").await;

    let created = service
        .create(user, checkout(&[(shirt.id, 2, "9.99")], None))
        .await
        .unwrap();

    let today = chrono::Utc::now().format("%Y%m%d").to_string();
    let pattern = Regex::new(&format!("^ORD-{today}-[0-9A-F]{{8}}$")).unwrap();
    assert!(pattern.is_match(&created.order.order_number), "{}", created.order.order_number);

    assert_eq!(created.order.status, OrderStatus::Pending);
    assert_eq!(created.items.len(), 1);
    let line = &created.items[0];
    assert_eq!(line.item.quantity, 2);
    assert_money_eq(line.item.total_price, money("19.98"), "line total");
    assert_eq!(line.product.as_ref().map(|p| p.product.id), Some(shirt.id));
    assert_money_eq(created.order.total, money("24.97"), "order total as sent");
}

#[tokio::test]
async fn test_order_with_unknown_product_writes_nothing() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = customer(&db, "bob").await;
    let shirt = product(&db, "Shirt", "9.99").await;

    let result = service
        .create(
            user,
            checkout(&[(shirt.id, 1, "9.99"), (Uuid::now_v7(), 1, "5.00")], None),
        )
        .await;
    assert!(matches!(result, Err(OrderError::Validation(_))));
    assert!(service.list_mine(user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_card_payment_marks_order_paid() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = customer(&db, "carol").await;
    let scarf = product(&db, "Scarf", "15.00").await;

    let created = service
        .create(user, checkout(&[(scarf.id, 1, "15.00")], Some("card")))
        .await
        .unwrap();
    assert_eq!(created.order.status, OrderStatus::Paid);
}

#[tokio::test]
async fn test_list_mine_is_newest_first_and_private() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let alice = customer(&db, "alice").await;
    let bob = customer(&db, "bob").await;
    let hat = product(&db, "Hat", "20.00").await;

    let first = service.create(alice, checkout(&[(hat.id, 1, "20.00")], None)).await.unwrap();
    let second = service.create(alice, checkout(&[(hat.id, 3, "20.00")], None)).await.unwrap();
    service.create(bob, checkout(&[(hat.id, 1, "20.00")], None)).await.unwrap();

    let mine: Vec<_> = service
        .list_mine(alice)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.order.id)
        .collect();
    assert_eq!(mine, vec![second.order.id, first.order.id]);

    assert!(matches!(
        service.get(bob, first.order.id).await,
        Err(OrderError::Forbidden(_))
    ));
    let admin = Actor::admin(Uuid::now_v7());
    assert_uuid_eq(service.get(admin, first.order.id).await.unwrap().order.id, first.order.id, "admin read");
}

#[tokio::test]
async fn test_status_dates_follow_transitions() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = customer(&db, "dave").await;
    let admin = Actor::admin(Uuid::now_v7());
    let coat = product(&db, "Coat", "120.00").await;

    let created = service.create(user, checkout(&[(coat.id, 1, "120.00")], None)).await.unwrap();
    let id = created.order.id;

    let shipped = service.update_status(admin, id, OrderStatus::Shipped).await.unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    let shipped_at = assert_some(shipped.shipped_date, "shipped date");
    assert!(shipped.delivered_date.is_none());

    let delivered = service.update_status(admin, id, OrderStatus::Delivered).await.unwrap();
    assert_eq!(delivered.shipped_date, Some(shipped_at));
    assert!(delivered.delivered_date.is_some());

    // Transitions are not validated
    let reopened = service.update_status(admin, id, OrderStatus::Pending).await.unwrap();
    assert_eq!(reopened.status, OrderStatus::Pending);
    assert_eq!(reopened.shipped_date, Some(shipped_at));

    assert!(matches!(
        service.update_status(user, id, OrderStatus::Cancelled).await,
        Err(OrderError::Forbidden(_))
    ));
}

#[tokio::test]
async fn test_receipt_resolves_customer_products_and_images() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = customer(&db, "erin").await;
    let boot = product(&db, "Boot", "89.00").await;

    let upload = PgUploadRepository::new(db.connection())
        .create(NewUpload {
            name: "boot.jpg".to_string(),
            size_mb: 0.1,
            file_path: "boot.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            extension: ".jpg".to_string(),
            uploader_id: None,
        })
        .await
        .unwrap();
    ProductImageService::new(PgProductImageRepository::new(db.connection()))
        .add(
            boot.id,
            AddProductImage {
                upload_id: upload.id,
                sort_order: None,
                is_primary: Some(true),
            },
        )
        .await
        .unwrap();

    let created = service.create(user, checkout(&[(boot.id, 1, "89.00")], None)).await.unwrap();

    let receipt = service
        .get_by_number(user, &created.order.order_number)
        .await
        .unwrap();
    assert_eq!(receipt.customer.as_ref().map(|c| c.username.as_str()), Some("erin"));
    let product = assert_some(receipt.details.items[0].product.clone(), "receipt product");
    assert_eq!(product.images.len(), 1);
    assert_eq!(product.images[0].upload.as_ref().map(|u| u.id), Some(upload.id));

    assert!(matches!(
        service.get_by_number(user, "ORD-19700101-00000000").await,
        Err(OrderError::NumberNotFound(_))
    ));
}

#[tokio::test]
async fn test_deleted_order_is_hidden() {
    let db = TestDatabase::new().await;
    let service = service(&db);
    let user = customer(&db, "frank").await;
    let admin = Actor::admin(Uuid::now_v7());
    let sock = product(&db, "Sock", "3.00").await;

    let created = service.create(user, checkout(&[(sock.id, 4, "3.00")], None)).await.unwrap();
    service.delete(admin, created.order.id).await.unwrap();

    assert!(matches!(
        service.get(user, created.order.id).await,
        Err(OrderError::NotFound(_))
    ));
    assert!(service.list_mine(user).await.unwrap().is_empty());
}
