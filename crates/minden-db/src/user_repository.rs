use chrono::{DateTime, NaiveDate, Utc};
use minden_core::{AirportUser, AppError, NewUser, Page, PageRequest, UserRole, UserUpdate};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use crate::database::db_error;

/// Accounts of the `airport_users` table.
///
/// Emails are normalized with [`AirportUser::normalize_email`] on every write
/// and lookup, so uniqueness is effectively case-insensitive.
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    birthdate: Option<NaiveDate>,
    password_hash: String,
    active: bool,
    email: String,
    phone: Option<String>,
    role: String,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    ticket_count: i64,
}

impl From<UserRow> for AirportUser {
    fn from(row: UserRow) -> Self {
        AirportUser {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            birthdate: row.birthdate,
            password_hash: row.password_hash,
            active: row.active,
            email: row.email,
            phone: row.phone,
            role: row.role.parse().unwrap_or(UserRole::User),
            last_login: row.last_login,
            created_at: row.created_at,
            ticket_count: row.ticket_count,
        }
    }
}

/// User columns plus the derived ticket count. Expects the user relation
/// aliased as `u`.
const USER_SELECT: &str = "SELECT u.id, u.first_name, u.last_name, u.birthdate, \
     u.password_hash, u.active, u.email, u.phone, u.role, u.last_login, u.created_at, \
     (SELECT COUNT(*) FROM tickets t WHERE t.airport_user_id = u.id) AS ticket_count";

impl UserRepository {
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<AirportUser>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{USER_SELECT} FROM airport_users u WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<AirportUser>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "{USER_SELECT} FROM airport_users u WHERE u.email = $1"
        ))
        .bind(AirportUser::normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM airport_users WHERE email = $1)")
                .bind(AirportUser::normalize_email(email))
                .fetch_one(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(exists)
    }

    /// Insert a new active account.
    pub async fn create(&self, user: &NewUser) -> Result<AirportUser, AppError> {
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO airport_users
                (first_name, last_name, birthdate, password_hash, email, phone, role, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            RETURNING id
            "#,
        )
        .bind(user.first_name.trim())
        .bind(user.last_name.trim())
        .bind(user.birthdate)
        .bind(&user.password_hash)
        .bind(AirportUser::normalize_email(&user.email))
        .bind(&user.phone)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        tracing::info!(user_id = %id, role = %user.role, "User created");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    pub async fn update_last_login(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE airport_users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE airport_users SET active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User", id));
        }
        tracing::info!(user_id = %id, active, "User activation changed");
        Ok(())
    }

    pub async fn set_role(&self, id: Uuid, role: UserRole) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE airport_users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User", id));
        }
        tracing::info!(user_id = %id, %role, "User role changed");
        Ok(())
    }

    /// Apply a partial update. Fields left as `None` keep their stored value.
    pub async fn update_by_admin(
        &self,
        id: Uuid,
        update: &UserUpdate,
    ) -> Result<AirportUser, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE airport_users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                active = COALESCE($6, active),
                role = COALESCE($7, role)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(update.first_name.as_deref().map(str::trim))
        .bind(update.last_name.as_deref().map(str::trim))
        .bind(update.email.as_deref().map(AirportUser::normalize_email))
        .bind(&update.phone)
        .bind(update.active)
        .bind(update.role.map(|r| r.as_str()))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    /// One page of users, newest account first.
    pub async fn list(&self, request: PageRequest) -> Result<Page<AirportUser>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{USER_SELECT} FROM airport_users u
             ORDER BY u.created_at DESC, u.id
             LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.limit))
        .bind(request.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        let total = self.count().await?;
        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM airport_users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }
}
