use crate::entities::{bugs, prelude::*};
use crate::models::{Bug, BugId, NewBug};
use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

/// Repository for bug report operations
pub struct BugRepository {
    conn: DatabaseConnection,
}

impl BugRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: bugs::Model) -> Bug {
        Bug {
            id: BugId(model.id),
            title: model.title,
            description: model.description,
            tag: model.tag,
            status: model.status,
            reported_by: model.reported_by,
            created_at: model.created_at,
        }
    }

    pub async fn insert(&self, bug: &NewBug, reported_by: &str) -> Result<BugId> {
        let active_model = bugs::ActiveModel {
            title: Set(bug.title.clone()),
            description: Set(bug.description.clone()),
            tag: Set(bug.tag.clone()),
            status: Set(bugs::DEFAULT_STATUS.to_string()),
            reported_by: Set(reported_by.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let res = Bugs::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to insert bug")?;

        info!("Bug {} reported by {}", res.last_insert_id, reported_by);
        Ok(BugId(res.last_insert_id))
    }

    /// Every bug in primary-key order.
    pub async fn list_all(&self) -> Result<Vec<Bug>> {
        let rows = Bugs::find()
            .order_by_asc(bugs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list bugs")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }
}
