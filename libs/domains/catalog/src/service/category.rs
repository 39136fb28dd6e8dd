use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CategoryInput};
use crate::repository::CategoryRepository;

/// Longest ancestor chain walked when assigning a parent
pub const MAX_CATEGORY_DEPTH: usize = 32;

#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: CategoryInput) -> CatalogResult<Category> {
        self.check_parent(None, input.parent_id).await?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_active().await
    }

    #[instrument(skip(self))]
    pub async fn list_root(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_root().await
    }

    #[instrument(skip(self))]
    pub async fn list_children(&self, parent_id: Uuid) -> CatalogResult<Vec<Category>> {
        self.repository.list_children(parent_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: CategoryInput) -> CatalogResult<Category> {
        self.check_parent(Some(id), input.parent_id).await?;
        self.repository
            .update(id, input)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::CategoryNotFound(id))
        }
    }

    /// Walk up from `parent_id` and refuse a chain that leads back to `id`.
    ///
    /// The direct parent must exist. Further up, a missing or deleted
    /// ancestor ends the walk as if it were a root.
    async fn check_parent(&self, id: Option<Uuid>, parent_id: Option<Uuid>) -> CatalogResult<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        if Some(parent_id) == id {
            return Err(CatalogError::Validation(
                "A category cannot be its own parent".to_string(),
            ));
        }

        let mut current = self
            .repository
            .get_by_id(parent_id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(parent_id))?;

        for _ in 0..MAX_CATEGORY_DEPTH {
            let Some(next) = current.parent_id else {
                return Ok(());
            };
            if Some(next) == id {
                tracing::warn!(category_id = ?id, %parent_id, "Rejected category cycle");
                return Err(CatalogError::Validation(
                    "Parent assignment would create a cycle".to_string(),
                ));
            }
            match self.repository.get_by_id(next).await? {
                Some(ancestor) => current = ancestor,
                None => return Ok(()),
            }
        }

        Err(CatalogError::Validation(format!(
            "Category tree is deeper than {} levels",
            MAX_CATEGORY_DEPTH
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCategoryRepository;
    use chrono::Utc;
    use std::collections::HashMap;

    fn category(id: Uuid, parent_id: Option<Uuid>) -> Category {
        Category {
            id,
            name: format!("category-{id}"),
            description: None,
            parent_id,
            sort_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn input(parent_id: Option<Uuid>) -> CategoryInput {
        CategoryInput {
            name: "Shirts".into(),
            description: None,
            parent_id,
            sort_order: 0,
            is_active: true,
        }
    }

    /// Serve `get_by_id` from a fixed set of categories
    fn with_tree(repo: &mut MockCategoryRepository, nodes: Vec<Category>) {
        let nodes: HashMap<Uuid, Category> = nodes.into_iter().map(|c| (c.id, c)).collect();
        repo.expect_get_by_id()
            .returning(move |id| Ok(nodes.get(&id).cloned()));
    }

    #[tokio::test]
    async fn test_create_root_skips_parent_lookup() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(category(Uuid::now_v7(), input.parent_id)));

        let service = CategoryService::new(repo);
        let created = service.create(input(None)).await.unwrap();
        assert!(created.parent_id.is_none());
    }

    #[tokio::test]
    async fn test_create_with_missing_parent_fails() {
        let mut repo = MockCategoryRepository::new();
        with_tree(&mut repo, vec![]);
        repo.expect_create().never();

        let service = CategoryService::new(repo);
        let missing = Uuid::now_v7();
        let result = service.create(input(Some(missing))).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_update().never();

        let service = CategoryService::new(repo);
        let id = Uuid::now_v7();
        let result = service.update(id, input(Some(id))).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_descendant_as_parent() {
        // root <- child <- grandchild; moving root under grandchild closes a loop
        let root = Uuid::now_v7();
        let child = Uuid::now_v7();
        let grandchild = Uuid::now_v7();

        let mut repo = MockCategoryRepository::new();
        with_tree(
            &mut repo,
            vec![
                category(root, None),
                category(child, Some(root)),
                category(grandchild, Some(child)),
            ],
        );
        repo.expect_update().never();

        let service = CategoryService::new(repo);
        let result = service.update(root, input(Some(grandchild))).await;
        assert!(matches!(result, Err(CatalogError::Validation(msg)) if msg.contains("cycle")));
    }

    #[tokio::test]
    async fn test_update_accepts_sibling_branch() {
        let root = Uuid::now_v7();
        let left = Uuid::now_v7();
        let right = Uuid::now_v7();

        let mut repo = MockCategoryRepository::new();
        with_tree(
            &mut repo,
            vec![
                category(root, None),
                category(left, Some(root)),
                category(right, Some(root)),
            ],
        );
        repo.expect_update()
            .times(1)
            .returning(move |id, input| Ok(Some(category(id, input.parent_id))));

        let service = CategoryService::new(repo);
        let updated = service.update(left, input(Some(right))).await.unwrap();
        assert_eq!(updated.parent_id, Some(right));
    }

    #[tokio::test]
    async fn test_walk_stops_at_max_depth() {
        let mut chain = vec![category(Uuid::now_v7(), None)];
        for _ in 0..=MAX_CATEGORY_DEPTH {
            let parent = chain.last().map(|c| c.id);
            chain.push(category(Uuid::now_v7(), parent));
        }
        let deepest = chain.last().map(|c| c.id).unwrap();

        let mut repo = MockCategoryRepository::new();
        with_tree(&mut repo, chain);
        repo.expect_create().never();

        let service = CategoryService::new(repo);
        let result = service.create(input(Some(deepest))).await;
        assert!(matches!(result, Err(CatalogError::Validation(msg)) if msg.contains("deeper")));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = CategoryService::new(repo);
        assert!(matches!(
            service.delete(Uuid::now_v7()).await,
            Err(CatalogError::CategoryNotFound(_))
        ));
    }
}
