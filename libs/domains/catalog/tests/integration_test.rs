//! Catalog repositories against a migrated SQLite database

use domain_catalog::*;
use domain_uploads::{NewUpload, PgUploadRepository, Upload, UploadRepository};
use rust_decimal::Decimal;
use test_utils::{TestDatabase, assertions::*, money};
use uuid::Uuid;

struct Catalog {
    categories: CategoryService<PgCategoryRepository>,
    products: ProductService<PgProductRepository>,
    images: ProductImageService<PgProductImageRepository>,
    uploads: PgUploadRepository,
}

fn catalog(db: &TestDatabase) -> Catalog {
    Catalog {
        categories: CategoryService::new(PgCategoryRepository::new(db.connection())),
        products: ProductService::new(PgProductRepository::new(db.connection())),
        images: ProductImageService::new(PgProductImageRepository::new(db.connection())),
        uploads: PgUploadRepository::new(db.connection()),
    }
}

fn category_input(name: &str, parent_id: Option<Uuid>, sort_order: i32) -> CategoryInput {
    CategoryInput {
        name: name.to_string(),
        description: None,
        parent_id,
        sort_order,
        is_active: true,
    }
}

fn product_input(name: &str, category_id: Uuid) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: None,
        price: money("49.90"),
        discount_price: None,
        stock_quantity: 10,
        sku: None,
        category_id,
        is_active: true,
        is_featured: false,
    }
}

impl Catalog {
    async fn category(&self, name: &str) -> Category {
        self.categories
            .create(category_input(name, None, 0))
            .await
            .unwrap()
    }

    async fn product(&self, input: ProductInput) -> Product {
        self.products.create(input).await.unwrap()
    }

    async fn upload(&self, name: &str) -> Upload {
        self.uploads
            .create(NewUpload {
                name: name.to_string(),
                size_mb: 0.25,
                file_path: format!("{}.jpg", Uuid::new_v4()),
                content_type: "image/jpeg".to_string(),
                extension: ".jpg".to_string(),
                uploader_id: None,
            })
            .await
            .unwrap()
    }

    async fn add_image(&self, product_id: Uuid, upload_id: Uuid, order: i32, primary: bool) -> ProductImage {
        self.images
            .add(
                product_id,
                AddProductImage {
                    upload_id,
                    sort_order: Some(order),
                    is_primary: Some(primary),
                },
            )
            .await
            .unwrap()
    }

    async fn primaries(&self, product_id: Uuid) -> Vec<Uuid> {
        self.images
            .list_by_product(product_id)
            .await
            .unwrap()
            .into_iter()
            .filter(|i| i.image.is_primary)
            .map(|i| i.image.id)
            .collect()
    }
}

#[tokio::test]
async fn test_category_tree_queries() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);

    let men = c.categories.create(category_input("Men", None, 2)).await.unwrap();
    let women = c.categories.create(category_input("Women", None, 1)).await.unwrap();
    let shirts = c
        .categories
        .create(category_input("Shirts", Some(men.id), 0))
        .await
        .unwrap();
    let mut hidden = category_input("Archive", Some(men.id), 1);
    hidden.is_active = false;
    c.categories.create(hidden).await.unwrap();

    let roots: Vec<_> = c.categories.list_root().await.unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(roots, vec![women.id, men.id]);

    let children: Vec<_> = c
        .categories
        .list_children(men.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(children, vec![shirts.id]);

    assert_eq!(c.categories.list_active().await.unwrap().len(), 3);
    assert_eq!(c.categories.list_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_category_cycle_is_rejected() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);

    let root = c.category("Root").await;
    let child = c
        .categories
        .create(category_input("Child", Some(root.id), 0))
        .await
        .unwrap();

    let result = c
        .categories
        .update(root.id, category_input("Root", Some(child.id), 0))
        .await;
    assert!(matches!(result, Err(CatalogError::Validation(_))));

    let unchanged = c.categories.get(root.id).await.unwrap();
    assert!(unchanged.parent_id.is_none());
}

#[tokio::test]
async fn test_create_then_update_keeps_created_at() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Shoes").await;

    let created = c.product(product_input("Loafer", category.id)).await;
    assert_eq!(created.created_at, created.updated_at);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let mut input = product_input("Penny loafer", category.id);
    input.price = money("59.00");
    let updated = c.products.update(created.id, input).await.unwrap();

    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_money_eq(updated.price, money("59.00"), "updated price");
}

#[tokio::test]
async fn test_deleted_product_is_hidden_everywhere() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Hats").await;
    let keep = c.product(product_input("Beanie", category.id)).await;
    let gone = c.product(product_input("Fedora", category.id)).await;

    c.products.delete(gone.id).await.unwrap();

    assert!(matches!(
        c.products.get(gone.id).await,
        Err(CatalogError::ProductNotFound(_))
    ));
    let ids: Vec<_> = c
        .products
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.product.id)
        .collect();
    assert_eq!(ids, vec![keep.id]);
    assert!(matches!(
        c.products.delete(gone.id).await,
        Err(CatalogError::ProductNotFound(_))
    ));
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_active_only() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Footwear").await;

    let by_name = c.product(product_input("Chelsea BOOT", category.id)).await;
    let mut described = product_input("Hiker", category.id);
    described.description = Some("Waterproof boot for trails".into());
    let by_description = c.product(described).await;
    let mut coded = product_input("Winter pair", category.id);
    coded.sku = Some("Boot-42".into());
    let by_sku = c.product(coded).await;

    let mut inactive = product_input("Retired boot", category.id);
    inactive.is_active = false;
    c.product(inactive).await;
    let deleted = c.product(product_input("Deleted boot", category.id)).await;
    c.products.delete(deleted.id).await.unwrap();
    c.product(product_input("Sandal", category.id)).await;

    for term in ["boot", "BOOT", "BoOt"] {
        let mut ids: Vec<_> = c
            .products
            .search(term)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.product.id)
            .collect();
        ids.sort();
        let mut expected = vec![by_name.id, by_description.id, by_sku.id];
        expected.sort();
        assert_eq!(ids, expected, "search for {term:?}");
    }

    assert!(matches!(
        c.products.search("  ").await,
        Err(CatalogError::Validation(_))
    ));
}

#[tokio::test]
async fn test_search_finds_non_ascii_terms() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Accessoires").await;

    let hat = c.product(product_input("Wollmütze Größe M", category.id)).await;
    c.product(product_input("Schal", category.id)).await;

    // Exact spelling, and a lower-cased ASCII prefix around the umlaut
    for term in ["Größe", "mütze", "WOLLmütze"] {
        let found: Vec<_> = c
            .products
            .search(term)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.product.id)
            .collect();
        assert_eq!(found, vec![hat.id], "term {term:?}");
    }
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Sale").await;

    let promo = c.product(product_input("Scarf 50% off", category.id)).await;
    c.product(product_input("Scarf 500 wool", category.id)).await;

    let found: Vec<_> = c
        .products
        .search("50%")
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.product.id)
        .collect();
    assert_eq!(found, vec![promo.id]);
}

#[tokio::test]
async fn test_product_listings_filter_and_resolve_category() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let coats = c.category("Coats").await;
    let shoes = c.category("Shoes").await;

    let mut featured = product_input("Trench", coats.id);
    featured.is_featured = true;
    let featured = c.product(featured).await;
    c.product(product_input("Parka", coats.id)).await;
    c.product(product_input("Sneaker", shoes.id)).await;

    let listed = c.products.list_featured().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_uuid_eq(listed[0].product.id, featured.id, "featured product");
    assert_eq!(listed[0].category.as_ref().map(|c| c.id), Some(coats.id));

    assert_eq!(c.products.list_by_category(coats.id).await.unwrap().len(), 2);
    assert_eq!(c.products.list_active().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_deleted_relatives_are_not_resolved() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Bags").await;
    let product = c.product(product_input("Tote", category.id)).await;

    let kept = c.upload("front.jpg").await;
    let dropped = c.upload("back.jpg").await;
    let removed = c.upload("side.jpg").await;
    c.add_image(product.id, kept.id, 0, true).await;
    c.add_image(product.id, dropped.id, 1, false).await;
    let removed_image = c.add_image(product.id, removed.id, 2, false).await;

    c.uploads.delete(dropped.id).await.unwrap();
    c.images.delete(removed_image.id).await.unwrap();
    c.categories.delete(category.id).await.unwrap();

    let details = c.products.get(product.id).await.unwrap();
    assert!(details.category.is_none());
    assert_eq!(details.images.len(), 2);
    assert_eq!(details.images[0].upload.as_ref().map(|u| u.id), Some(kept.id));
    assert!(details.images[1].upload.is_none());
}

#[tokio::test]
async fn test_at_most_one_primary_image() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Dresses").await;
    let product = c.product(product_input("Maxi", category.id)).await;
    let other = c.product(product_input("Midi", category.id)).await;

    let first = c.add_image(product.id, c.upload("1.jpg").await.id, 0, true).await;
    let second = c.add_image(product.id, c.upload("2.jpg").await.id, 1, true).await;
    let other_primary = c.add_image(other.id, c.upload("3.jpg").await.id, 0, true).await;
    assert_eq!(c.primaries(product.id).await, vec![second.id]);

    let promoted = c.images.set_primary(first.id).await.unwrap();
    assert!(promoted.is_primary);
    assert_eq!(c.primaries(product.id).await, vec![first.id]);

    // Other products keep their own primary
    assert_eq!(c.primaries(other.id).await, vec![other_primary.id]);
}

#[tokio::test]
async fn test_adding_same_upload_twice_returns_existing_image() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Belts").await;
    let product = c.product(product_input("Leather belt", category.id)).await;
    let upload = c.upload("belt.jpg").await;

    let first = c.add_image(product.id, upload.id, 3, false).await;
    let second = c.add_image(product.id, upload.id, 0, true).await;

    assert_eq!(second, first);
    assert_eq!(c.images.list_by_product(product.id).await.unwrap().len(), 1);
    assert!(c.primaries(product.id).await.is_empty());
}

#[tokio::test]
async fn test_images_follow_sort_order() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Socks").await;
    let product = c.product(product_input("Wool socks", category.id)).await;

    let late = c.add_image(product.id, c.upload("a.jpg").await.id, 5, false).await;
    let early = c.add_image(product.id, c.upload("b.jpg").await.id, 1, false).await;

    let order = |images: Vec<ProductImageDetails>| images.into_iter().map(|i| i.image.id).collect::<Vec<_>>();
    assert_eq!(order(c.images.list_by_product(product.id).await.unwrap()), vec![early.id, late.id]);

    c.images.update_order(late.id, 0).await.unwrap();
    assert_eq!(order(c.images.list_by_product(product.id).await.unwrap()), vec![late.id, early.id]);
}

#[tokio::test]
async fn test_money_survives_storage() {
    let db = TestDatabase::new().await;
    let c = catalog(&db);
    let category = c.category("Jeans").await;

    let mut input = product_input("Slim fit", category.id);
    input.price = money("79.99");
    input.discount_price = Some(money("59.99"));
    let created = c.product(input).await;

    let fetched = c.products.get(created.id).await.unwrap().product;
    assert_money_eq(fetched.price, money("79.99"), "price");
    assert_money_eq(
        fetched.discount_price.unwrap_or(Decimal::ZERO),
        money("59.99"),
        "discount price",
    );
}
