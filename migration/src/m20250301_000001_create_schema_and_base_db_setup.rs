use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS fitcoach_platform;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO fitcoach_platform, public;")
            .await?;

        // Create the base DB user privileges that the platform queries run under
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE fitcoach TO fitcoach;
                    GRANT ALL ON SCHEMA fitcoach_platform TO fitcoach;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA fitcoach_platform GRANT ALL ON TABLES TO fitcoach;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA fitcoach_platform GRANT ALL ON SEQUENCES TO fitcoach;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA fitcoach_platform GRANT ALL ON FUNCTIONS TO fitcoach;
                END $$;
            "#)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA fitcoach_platform REVOKE ALL ON FUNCTIONS FROM fitcoach;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA fitcoach_platform REVOKE ALL ON SEQUENCES FROM fitcoach;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA fitcoach_platform REVOKE ALL ON TABLES FROM fitcoach;
                    REVOKE ALL ON SCHEMA fitcoach_platform FROM fitcoach;
                    REVOKE ALL PRIVILEGES ON DATABASE fitcoach FROM fitcoach;
                END $$;
            "#)
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS fitcoach_platform CASCADE;")
            .await?;

        Ok(())
    }
}
