//! API Handlers
//!
//! HTTP request handlers for the listing service endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheBackend, CacheStore, RedisCache, SharedCache, StatsSource};
use crate::config::Config;
use crate::db::{InMemoryPropertyRepository, PropertyRepository};
use crate::error::{AppError, Result};
use crate::events::{CacheInvalidator, PropertyService};
use crate::listings::{compute_cache_metrics, MetricsSnapshot, PropertyCache};
use crate::models::{HealthResponse, NewProperty, PropertyJson, PropertyListResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache store holding the listing and whole responses
    pub cache: Arc<dyn CacheBackend>,
    /// The in-process store, when that is the cache; swept by the cleanup task
    pub local_store: Option<SharedCache>,
    /// Cached listing reads
    pub listing: Arc<PropertyCache>,
    /// Property writes, with cache invalidation wired in
    pub properties: Arc<PropertyService>,
    /// Statistics interface of the cache server
    pub stats: Arc<dyn StatsSource>,
    /// Log a metrics snapshot on every list render
    pub log_metrics_on_list: bool,
}

impl AppState {
    /// Wires the listing cache, write path and invalidation listener around
    /// one in-process cache store and one repository.
    pub fn new(store: CacheStore, repo: Arc<dyn PropertyRepository>) -> Self {
        let local = SharedCache::new(store);
        let mut state = Self::with_backend(
            Arc::new(local.clone()),
            Arc::new(local.clone()),
            repo,
        );
        state.local_store = Some(local);
        state
    }

    /// Same wiring around any cache server, given its key-value and
    /// statistics interfaces.
    pub fn with_backend(
        cache: Arc<dyn CacheBackend>,
        stats: Arc<dyn StatsSource>,
        repo: Arc<dyn PropertyRepository>,
    ) -> Self {
        let listing = Arc::new(PropertyCache::new(cache.clone(), repo.clone()));
        let properties = PropertyService::new(repo)
            .subscribe(Arc::new(CacheInvalidator::new(listing.clone())));

        Self {
            cache,
            local_store: None,
            listing,
            properties: Arc::new(properties),
            stats,
            log_metrics_on_list: true,
        }
    }

    /// Creates a new AppState from configuration, backed by an empty
    /// in-memory property table.
    ///
    /// Connects to `REDIS_URL` when set; otherwise the cache store runs
    /// in-process.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let repo = Arc::new(InMemoryPropertyRepository::new());
        let mut state = match &config.redis_url {
            Some(url) => {
                let redis = RedisCache::connect(url).await?;
                Self::with_backend(Arc::new(redis.clone()), Arc::new(redis), repo)
            }
            None => {
                let store = CacheStore::new(config.max_entries, config.default_ttl)
                    .with_max_value_size(config.max_value_size);
                Self::new(store, repo)
            }
        };
        state.log_metrics_on_list = config.log_metrics_on_list;
        Ok(state)
    }

    /// Replaces the statistics interface metrics are read from.
    pub fn with_stats_source(mut self, stats: Arc<dyn StatsSource>) -> Self {
        self.stats = stats;
        self
    }
}

/// Handler for GET /properties
///
/// Returns every property. Runs behind the response cache, so this body only
/// executes when the whole response is not cached.
pub async fn list_properties(State(state): State<AppState>) -> Result<Json<PropertyListResponse>> {
    let properties = state.listing.all_properties().await?;

    if state.log_metrics_on_list {
        // Logged inside; the snapshot itself is not part of the response.
        compute_cache_metrics(state.stats.as_ref()).await;
    }

    Ok(Json(PropertyListResponse::new(&properties)))
}

/// Handler for GET /cache-metrics
///
/// Always 200; failures show up in the snapshot's `error` field.
pub async fn cache_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(compute_cache_metrics(state.stats.as_ref()).await)
}

/// Handler for POST /properties
pub async fn create_property(
    State(state): State<AppState>,
    Json(req): Json<NewProperty>,
) -> Result<(StatusCode, Json<PropertyJson>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let property = state.properties.create(req).await?;
    Ok((StatusCode::CREATED, Json(PropertyJson::from(&property))))
}

/// Handler for PUT /properties/:id
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<NewProperty>,
) -> Result<Json<PropertyJson>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let property = state.properties.update(id, req).await?;
    Ok(Json(PropertyJson::from(&property)))
}

/// Handler for DELETE /properties/:id
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<PropertyJson>> {
    let property = state.properties.delete(id).await?;
    Ok(Json(PropertyJson::from(&property)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
