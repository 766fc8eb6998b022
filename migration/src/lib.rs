pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_schema_and_base_db_setup;
mod m20250301_000002_base_migration;
mod m20250301_000003_add_billing_tables;
mod m20250301_000004_add_sorting_indexes;
mod m20250301_000005_add_initial_super_admin;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_schema_and_base_db_setup::Migration),
            Box::new(m20250301_000002_base_migration::Migration),
            Box::new(m20250301_000003_add_billing_tables::Migration),
            Box::new(m20250301_000004_add_sorting_indexes::Migration),
            Box::new(m20250301_000005_add_initial_super_admin::Migration),
        ]
    }
}
