use password_auth::generate_hash;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SUPER_ADMIN_EMAIL: &str = "admin@fitcoach.app";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The initial password must be rotated immediately after first login.
        let password_hash = generate_hash("ChangeMe!2025");
        let now = chrono::Utc::now();

        let insert = format!(
            "INSERT INTO fitcoach_platform.users \
             (email, first_name, last_name, display_name, password, role, timezone, created_at, updated_at) \
             VALUES ('{SUPER_ADMIN_EMAIL}', 'Platform', 'Admin', 'Platform Admin', '{password_hash}', 'super_admin', 'UTC', '{now}', '{now}') \
             ON CONFLICT (email) DO NOTHING;",
        );

        manager.get_connection().execute_unprepared(&insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "DELETE FROM fitcoach_platform.users WHERE email = '{SUPER_ADMIN_EMAIL}';"
            ))
            .await?;

        Ok(())
    }
}
