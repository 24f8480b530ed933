//! Blog Category Use Case

use std::sync::Arc;

use crate::domain::records::BlogCategory;
use crate::domain::repository::BlogSource;
use crate::error::ContentResult;

pub struct BlogCategoryUseCase<B>
where
    B: BlogSource,
{
    blog: Arc<B>,
}

impl<B> BlogCategoryUseCase<B>
where
    B: BlogSource,
{
    pub fn new(blog: Arc<B>) -> Self {
        Self { blog }
    }

    /// Category detail and its posts, fetched together
    pub async fn execute(&self, id: u64) -> ContentResult<BlogCategory> {
        let (category, posts) =
            tokio::try_join!(self.blog.category(id), self.blog.posts_in_category(id))?;
        Ok(BlogCategory { category, posts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::FakeBlog;

    #[tokio::test]
    async fn test_category_with_posts() {
        let blog = FakeBlog::with_category(4, "Generative AI", 3);
        let category = BlogCategoryUseCase::new(Arc::new(blog)).execute(4).await.unwrap();
        assert_eq!(category.name(), Some("Generative AI"));
        assert_eq!(category.posts.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_category() {
        let blog = FakeBlog::with_category(4, "Generative AI", 3);
        let err = BlogCategoryUseCase::new(Arc::new(blog)).execute(5).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load content (HTTP 404)");
    }
}
