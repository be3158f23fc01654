use async_trait::async_trait;
use uuid::Uuid;
use sqlx::PgPool;
use chrono::{DateTime, Utc};
use pizza_core::repository::AdminRepository;
use pizza_core::{Admin, CoreError, CoreResult};

use crate::database::map_db_error;

pub struct StoreAdminRepository {
    pool: PgPool,
}

impl StoreAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = CoreError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(Admin {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role.parse()?,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl AdminRepository for StoreAdminRepository {
    async fn create_admin(&self, admin: &Admin) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, email, password_hash, role, last_login, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(admin.id)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .bind(admin.last_login)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error(e, || CoreError::ValidationError(format!("admin {} already exists", admin.email))))?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Admin>> {
        sqlx::query_as::<_, AdminRow>(
            "SELECT id, email, password_hash, role, last_login, created_at, updated_at FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CoreError::StorageError(e.to_string()))?
        .map(Admin::try_from)
        .transpose()
    }

    async fn record_login(&self, id: Uuid) -> CoreResult<()> {
        sqlx::query("UPDATE admins SET last_login = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| CoreError::StorageError(e.to_string()))?;
        Ok(())
    }
}
