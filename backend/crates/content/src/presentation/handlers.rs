//! HTTP Handlers

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use auth::domain::domain_policy::DomainPolicy;
use auth::presentation::middleware::{AdminToken, PortalPrincipal};
use platform::clock::Clock;

use crate::application::{
    BlogCategoryUseCase, CollectionUseCase, ContentConfig, FetchCommonDataUseCase,
    FetchUserDataUseCase,
};
use crate::domain::collection::CollectionName;
use crate::domain::records::{BlogCategory, CommonData, UserData};
use crate::domain::repository::{BlogSource, ContentSource};
use crate::error::ContentResult;
use crate::presentation::dto::{CreateEntryRequest, CreateEntryResponse, ListResponse};

/// Shared state for content handlers
pub struct ContentAppState<S, B> {
    pub cms: Arc<S>,
    pub blog: Arc<B>,
    pub config: Arc<ContentConfig>,
    pub policy: Arc<DomainPolicy>,
    pub clock: Arc<dyn Clock>,
}

impl<S, B> Clone for ContentAppState<S, B> {
    fn clone(&self) -> Self {
        Self {
            cms: self.cms.clone(),
            blog: self.blog.clone(),
            config: self.config.clone(),
            policy: self.policy.clone(),
            clock: self.clock.clone(),
        }
    }
}

// ============================================================================
// Dashboards
// ============================================================================

/// GET /api/content/common
pub async fn common_data<S, B>(State(state): State<ContentAppState<S, B>>) -> Json<CommonData>
where
    S: ContentSource + Send + Sync + 'static,
    B: BlogSource + Send + Sync + 'static,
{
    let use_case = FetchCommonDataUseCase::new(state.cms.clone());
    Json(use_case.execute().await)
}

/// GET /api/content/me
pub async fn my_data<S, B>(
    State(state): State<ContentAppState<S, B>>,
    Extension(principal): Extension<PortalPrincipal>,
) -> ContentResult<Json<UserData>>
where
    S: ContentSource + Send + Sync + 'static,
    B: BlogSource + Send + Sync + 'static,
{
    let email = principal
        .identity
        .map(|identity| identity.email)
        .unwrap_or_default();

    let use_case = FetchUserDataUseCase::new(
        state.cms.clone(),
        state.policy.clone(),
        state.clock.clone(),
        state.config.clone(),
    );
    let data = use_case.execute(&email).await?;

    tracing::debug!(tab_id = %principal.tab_id, "Dashboard data served");
    Ok(Json(data))
}

// ============================================================================
// Collections
// ============================================================================

/// GET /api/content/{collection}
pub async fn list_collection<S, B>(
    State(state): State<ContentAppState<S, B>>,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> ContentResult<Json<ListResponse>>
where
    S: ContentSource + Send + Sync + 'static,
    B: BlogSource + Send + Sync + 'static,
{
    let collection: CollectionName = collection.parse()?;
    let use_case = CollectionUseCase::new(state.cms.clone());
    let data = use_case.list(&collection, &params).await?;
    Ok(Json(ListResponse { data }))
}

/// POST /api/content/{collection} (admin)
pub async fn create_entry<S, B>(
    State(state): State<ContentAppState<S, B>>,
    Path(collection): Path<String>,
    Extension(AdminToken(token)): Extension<AdminToken>,
    Json(req): Json<CreateEntryRequest>,
) -> ContentResult<(StatusCode, Json<CreateEntryResponse>)>
where
    S: ContentSource + Send + Sync + 'static,
    B: BlogSource + Send + Sync + 'static,
{
    let collection: CollectionName = collection.parse()?;
    let use_case = CollectionUseCase::new(state.cms.clone());
    let data = use_case.create(&collection, req.data, &token).await?;
    Ok((StatusCode::CREATED, Json(CreateEntryResponse { data })))
}

// ============================================================================
// Blog
// ============================================================================

/// GET /api/blog/categories/{id}
pub async fn blog_category<S, B>(
    State(state): State<ContentAppState<S, B>>,
    Path(id): Path<u64>,
) -> ContentResult<Json<BlogCategory>>
where
    S: ContentSource + Send + Sync + 'static,
    B: BlogSource + Send + Sync + 'static,
{
    let use_case = BlogCategoryUseCase::new(state.blog.clone());
    Ok(Json(use_case.execute(id).await?))
}
