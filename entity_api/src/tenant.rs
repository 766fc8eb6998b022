use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::{
    tenant_status::TenantStatus,
    tenants::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait,
    DatabaseConnection, QueryOrder, TryIntoModel,
};
use slugify::slugify;

use log::*;

pub async fn create(db: &impl ConnectionTrait, tenant_model: Model) -> Result<Model, Error> {
    debug!("New Tenant Model to be inserted: {tenant_model:?}");

    let now = Utc::now();
    let name = tenant_model.name;

    let tenant_active_model: ActiveModel = ActiveModel {
        name: Set(name.clone()),
        slug: Set(slugify!(name.as_str())),
        status: Set(TenantStatus::Active),
        logo: Set(tenant_model.logo),
        stripe_customer_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(tenant_active_model.insert(db).await?)
}

pub async fn update(db: &DatabaseConnection, id: Id, model: Model) -> Result<Model, Error> {
    let tenant = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(tenant.id),
        name: Set(model.name),
        slug: Unchanged(tenant.slug),
        status: Unchanged(tenant.status),
        logo: Set(model.logo),
        stripe_customer_id: Unchanged(tenant.stripe_customer_id),
        created_at: Unchanged(tenant.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let tenant_model = find_by_id(db, id).await?;
    tenant_model.delete(db).await?;
    Ok(())
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, Error> {
    Ok(Entity::find().order_by_asc(Column::Name).all(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_stripe_customer_id(
    db: &impl ConnectionTrait,
    stripe_customer_id: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::StripeCustomerId.eq(stripe_customer_id))
        .one(db)
        .await?)
}

pub async fn set_status(
    db: &impl ConnectionTrait,
    id: Id,
    status: TenantStatus,
) -> Result<Model, Error> {
    let tenant = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(tenant.id),
        name: Unchanged(tenant.name),
        slug: Unchanged(tenant.slug),
        status: Set(status),
        logo: Unchanged(tenant.logo),
        stripe_customer_id: Unchanged(tenant.stripe_customer_id),
        created_at: Unchanged(tenant.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn set_stripe_customer_id(
    db: &impl ConnectionTrait,
    id: Id,
    stripe_customer_id: &str,
) -> Result<Model, Error> {
    let tenant = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(tenant.id),
        name: Unchanged(tenant.name),
        slug: Unchanged(tenant.slug),
        status: Unchanged(tenant.status),
        logo: Unchanged(tenant.logo),
        stripe_customer_id: Set(Some(stripe_customer_id.to_string())),
        created_at: Unchanged(tenant.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn count_by_status(
    db: &DatabaseConnection,
    status: TenantStatus,
) -> Result<u64, Error> {
    Ok(Entity::find()
        .filter(Column::Status.eq(status))
        .count(db)
        .await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use entity::{tenants, Id};
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    #[tokio::test]
    async fn find_all_returns_a_list_of_records_when_present() -> Result<(), Error> {
        let now = Utc::now();
        let tenants = vec![vec![
            tenants::Model {
                id: Id::new_v4(),
                name: "Iron Athletics".to_owned(),
                slug: "iron-athletics".to_owned(),
                status: TenantStatus::Active,
                logo: None,
                stripe_customer_id: None,
                created_at: now.into(),
                updated_at: now.into(),
            },
            tenants::Model {
                id: Id::new_v4(),
                name: "Peak Performance".to_owned(),
                slug: "peak-performance".to_owned(),
                status: TenantStatus::Active,
                logo: None,
                stripe_customer_id: None,
                created_at: now.into(),
                updated_at: now.into(),
            },
        ]];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(tenants.clone())
            .into_connection();

        assert_eq!(find_all(&db).await?, tenants[0]);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_stripe_customer_id_filters_on_customer_id() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<tenants::Model>::new()])
            .into_connection();

        let _ = find_by_stripe_customer_id(&db, "cus_123").await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "tenants"."id", "tenants"."name", "tenants"."slug", "tenants"."status", "tenants"."logo", "tenants"."stripe_customer_id", "tenants"."created_at", "tenants"."updated_at" FROM "fitcoach_platform"."tenants" WHERE "tenants"."stripe_customer_id" = $1 LIMIT $2"#,
                ["cus_123".into(), 1u64.into()]
            )]
        );

        Ok(())
    }
}
