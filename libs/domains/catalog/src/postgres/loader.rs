//! Batch resolution of a product's category, images and uploads.
//!
//! Relatives are fetched with one `IN (...)` query per table instead of a
//! join, and soft-deleted relatives are left out: a product whose category
//! was deleted gets `category: None`, a deleted image disappears from the
//! list and an image whose upload was deleted keeps `upload: None`.

use std::collections::{HashMap, HashSet};

use database::NotDeleted;
use domain_uploads::Upload;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entity::{category, product, product_image};
use crate::models::{Category, ProductDetails, ProductImageDetails};

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

/// Attach uploads to already-ordered image rows.
pub async fn load_images<C: ConnectionTrait>(
    conn: &C,
    images: Vec<product_image::Model>,
) -> Result<Vec<ProductImageDetails>, DbErr> {
    let upload_ids = distinct(images.iter().map(|image| image.upload_id));
    let uploads: HashMap<Uuid, Upload> = if upload_ids.is_empty() {
        HashMap::new()
    } else {
        domain_uploads::entity::Entity::find()
            .not_deleted()
            .filter(domain_uploads::entity::Column::Id.is_in(upload_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|model| (model.id, model.into()))
            .collect()
    };

    Ok(images
        .into_iter()
        .map(|image| {
            let upload = uploads.get(&image.upload_id).cloned();
            ProductImageDetails {
                image: image.into(),
                upload,
            }
        })
        .collect())
}

/// Resolve relatives for `products`, keeping their order.
pub async fn load_details<C: ConnectionTrait>(
    conn: &C,
    products: Vec<product::Model>,
) -> Result<Vec<ProductDetails>, DbErr> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let category_ids = distinct(products.iter().map(|p| p.category_id));
    let categories: HashMap<Uuid, Category> = category::Entity::find()
        .not_deleted()
        .filter(category::Column::Id.is_in(category_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|model| (model.id, model.into()))
        .collect();

    let product_ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let images = product_image::Entity::find()
        .not_deleted()
        .filter(product_image::Column::ProductId.is_in(product_ids))
        .order_by_asc(product_image::Column::SortOrder)
        .order_by_asc(product_image::Column::CreatedAt)
        .all(conn)
        .await?;

    let mut images_by_product: HashMap<Uuid, Vec<ProductImageDetails>> = HashMap::new();
    for image in load_images(conn, images).await? {
        images_by_product
            .entry(image.image.product_id)
            .or_default()
            .push(image);
    }

    Ok(products
        .into_iter()
        .map(|model| {
            let category = categories.get(&model.category_id).cloned();
            let images = images_by_product.remove(&model.id).unwrap_or_default();
            ProductDetails {
                product: model.into(),
                category,
                images,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_keeps_first_occurrence_order() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        assert_eq!(distinct([b, a, b, a].into_iter()), vec![b, a]);
    }
}
