use sea_orm::{EnumIter, Iterable};
use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
struct SubscriptionStatus;

#[derive(DeriveIden, EnumIter)]
enum SubscriptionStatusVariants {
    Incomplete,
    Trialing,
    Active,
    PastDue,
    Canceled,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    TenantId,
    StripeSubscriptionId,
    Plan,
    Status,
    CurrentPeriodEnd,
    CancelAtPeriodEnd,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Invoices {
    Table,
    Id,
    TenantId,
    StripeInvoiceId,
    AmountDueCents,
    AmountPaidCents,
    Currency,
    Status,
    HostedInvoiceUrl,
    IssuedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    TenantId,
    InvoiceId,
    StripePaymentIntentId,
    AmountCents,
    Currency,
    Status,
    PaidAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum WebhookEvents {
    Table,
    Id,
    StripeEventId,
    EventType,
    ProcessedAt,
}

fn uuid_pk() -> ColumnDef {
    let mut col = ColumnDef::new(Alias::new("id"));
    col.uuid()
        .not_null()
        .primary_key()
        .default(Expr::cust("gen_random_uuid()"));
    col
}

fn timestamptz(name: impl IntoIden) -> ColumnDef {
    let mut col = ColumnDef::new(name);
    col.timestamp_with_time_zone()
        .not_null()
        .default(Expr::cust("now()"));
    col
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("SET search_path TO fitcoach_platform, public;")
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(SubscriptionStatus)
                    .values(SubscriptionStatusVariants::iter())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .col(&mut uuid_pk())
                    .col(
                        ColumnDef::new(Subscriptions::TenantId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::StripeSubscriptionId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subscriptions::Plan).string().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::Status)
                            .custom("fitcoach_platform.subscription_status")
                            .not_null()
                            .default("incomplete"),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::CurrentPeriodEnd)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(Subscriptions::CancelAtPeriodEnd)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut timestamptz(Subscriptions::CreatedAt))
                    .col(&mut timestamptz(Subscriptions::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subscriptions::Table, Subscriptions::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Invoices::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Invoices::StripeInvoiceId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Invoices::AmountDueCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::AmountPaidCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Invoices::Currency).string().not_null())
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(ColumnDef::new(Invoices::HostedInvoiceUrl).string())
                    .col(
                        ColumnDef::new(Invoices::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(&mut timestamptz(Invoices::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Invoices::Table, Invoices::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Payments::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Payments::InvoiceId).uuid())
                    .col(
                        ColumnDef::new(Payments::StripePaymentIntentId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::Currency).string().not_null())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(ColumnDef::new(Payments::PaidAt).timestamp_with_time_zone())
                    .col(&mut timestamptz(Payments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::InvoiceId)
                            .to(Invoices::Table, Invoices::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // The webhook idempotency ledger. The unique constraint on the
        // Stripe event id is what arbitrates duplicate deliveries.
        manager
            .create_table(
                Table::create()
                    .table(WebhookEvents::Table)
                    .col(&mut uuid_pk())
                    .col(
                        ColumnDef::new(WebhookEvents::StripeEventId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WebhookEvents::EventType).string().not_null())
                    .col(&mut timestamptz(WebhookEvents::ProcessedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ["webhook_events", "payments", "invoices", "subscriptions"] {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "DROP TABLE IF EXISTS fitcoach_platform.{table} CASCADE;"
                ))
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS fitcoach_platform.subscription_status;")
            .await?;

        Ok(())
    }
}
