//! List Categories Use Case

use std::sync::Arc;

use crate::domain::entity::BlogCategory;
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;

pub struct ListCategoriesUseCase<R>
where
    R: BlogRepository,
{
    repo: Arc<R>,
}

impl<R> ListCategoriesUseCase<R>
where
    R: BlogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> BlogResult<Vec<BlogCategory>> {
        self.repo.list_categories().await
    }
}
