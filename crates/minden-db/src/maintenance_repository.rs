use chrono::{DateTime, Utc};
use minden_core::{AppError, MaintenanceLog, NewMaintenanceLog};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use crate::database::db_error;

#[derive(Clone)]
pub struct MaintenanceLogRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct MaintenanceLogRow {
    id: Uuid,
    plane_id: String,
    maintenance_date: DateTime<Utc>,
    description: String,
    technician: String,
    next_maintenance: Option<DateTime<Utc>>,
}

impl From<MaintenanceLogRow> for MaintenanceLog {
    fn from(row: MaintenanceLogRow) -> Self {
        MaintenanceLog {
            id: row.id,
            plane_id: row.plane_id,
            maintenance_date: row.maintenance_date,
            description: row.description,
            technician: row.technician,
            next_maintenance: row.next_maintenance,
        }
    }
}

impl MaintenanceLogRepository {
    /// All logs, most recent maintenance first.
    pub async fn list(&self) -> Result<Vec<MaintenanceLog>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceLogRow>(
            r#"
            SELECT id, plane_id, maintenance_date, description, technician, next_maintenance
            FROM maintenance_logs
            ORDER BY maintenance_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<MaintenanceLog>, AppError> {
        let row = sqlx::query_as::<_, MaintenanceLogRow>(
            r#"
            SELECT id, plane_id, maintenance_date, description, technician, next_maintenance
            FROM maintenance_logs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn create(&self, log: &NewMaintenanceLog) -> Result<MaintenanceLog, AppError> {
        let row = sqlx::query_as::<_, MaintenanceLogRow>(
            r#"
            INSERT INTO maintenance_logs
                (plane_id, maintenance_date, description, technician, next_maintenance)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, plane_id, maintenance_date, description, technician, next_maintenance
            "#,
        )
        .bind(&log.plane_id)
        .bind(log.maintenance_date)
        .bind(&log.description)
        .bind(&log.technician)
        .bind(log.next_maintenance)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }
}
