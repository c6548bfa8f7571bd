// src/spots/repository.rs
//! Persistence seam for spots

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use super::models::{Spot, SpotRow};
use crate::auth::AuthedUser;
use crate::common::ApiError;
use crate::services::BackendClient;

#[async_trait]
pub trait SpotRepository: Send + Sync {
    /// All spots for the session's user, newest first
    async fn fetch_for_user(&self, session: &AuthedUser) -> Result<Vec<Spot>, ApiError>;

    async fn insert(&self, session: &AuthedUser, spot: &Spot) -> Result<(), ApiError>;
}

// ============================================================================
// SQLite
// ============================================================================

pub struct SqliteSpotRepository {
    db: SqlitePool,
}

impl SqliteSpotRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SpotRepository for SqliteSpotRepository {
    async fn fetch_for_user(&self, session: &AuthedUser) -> Result<Vec<Spot>, ApiError> {
        let rows = sqlx::query_as::<_, SpotRow>(
            r#"
            SELECT id, user_id, name, neighborhood, style, note, address, photo,
                   lat, lng, created_at
            FROM spots
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(&session.id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        debug!(user_id = %session.id, count = rows.len(), "Fetched spots from SQLite");
        Ok(rows.into_iter().map(Spot::from).collect())
    }

    async fn insert(&self, session: &AuthedUser, spot: &Spot) -> Result<(), ApiError> {
        sqlx::query(
            r#"
            INSERT INTO spots (id, user_id, name, neighborhood, style, note, address, photo,
                               lat, lng, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&spot.id)
        .bind(&session.id)
        .bind(&spot.name)
        .bind(&spot.neighborhood)
        .bind(&spot.style)
        .bind(&spot.note)
        .bind(spot.address.as_deref())
        .bind(spot.photo.as_deref())
        .bind(spot.lat())
        .bind(spot.lng())
        .bind(&spot.created_at)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(())
    }
}

// ============================================================================
// Remote REST table
// ============================================================================

pub struct RemoteSpotRepository {
    backend: BackendClient,
}

impl RemoteSpotRepository {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl SpotRepository for RemoteSpotRepository {
    async fn fetch_for_user(&self, session: &AuthedUser) -> Result<Vec<Spot>, ApiError> {
        let rows = self
            .backend
            .select_spots(session.access_token.as_deref(), &session.id)
            .await?;

        debug!(user_id = %session.id, count = rows.len(), "Fetched spots from backend");
        Ok(rows.into_iter().map(Spot::from).collect())
    }

    async fn insert(&self, session: &AuthedUser, spot: &Spot) -> Result<(), ApiError> {
        let mut row = SpotRow::from(spot.clone());
        row.user_id = session.id.clone();
        self.backend
            .insert_spot(session.access_token.as_deref(), &row)
            .await?;
        Ok(())
    }
}
