use super::error::{EntityApiErrorKind, Error};
use crate::{activation_token, user};
use chrono::Utc;
use entity::{
    student_status::StudentStatus,
    students::{ActiveModel, Column, Entity, Model},
    users, Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, Order,
    QueryOrder, TransactionTrait,
};

use log::*;

/// Sort order for student listings. Name sorting is by the linked user's
/// last name, which requires the join done in `find_by_tenant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentSort {
    Name,
    CreatedAt,
}

pub async fn create(db: &impl ConnectionTrait, student_model: Model) -> Result<Model, Error> {
    debug!("New Student Model to be inserted: {student_model:?}");

    let now = Utc::now();
    let student_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(student_model.tenant_id),
        user_id: Set(student_model.user_id),
        trainer_id: Set(student_model.trainer_id),
        status: Set(StudentStatus::Pending),
        birth_date: Set(student_model.birth_date),
        goal: Set(student_model.goal),
        notes: Set(student_model.notes),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(student_active_model.insert(db).await?)
}

/// Creates the student's user account, the student record and an activation
/// token in a single transaction. The user row is created with an unusable
/// random password; it only becomes usable once the invitation is accepted.
pub async fn create_with_user(
    db: &impl TransactionTrait,
    mut user_model: users::Model,
    mut student_model: Model,
) -> Result<(users::Model, Model, entity::activation_tokens::Model), Error> {
    let txn = db.begin().await?;

    user_model.role = user::Role::Student;
    user_model.tenant_id = Some(student_model.tenant_id);
    // Never log in with this; activation replaces it.
    user_model.password = activation_token::generate_token();
    let user = user::create(&txn, user_model).await?;

    student_model.user_id = user.id;
    let student = create(&txn, student_model).await?;

    let token = activation_token::issue(&txn, user.id).await?;

    txn.commit().await?;

    Ok((user, student, token))
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_user_id(db: &impl ConnectionTrait, user_id: Id) -> Result<Model, Error> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

/// Lists a tenant's students together with their user accounts, optionally
/// narrowed to one trainer and/or one status.
pub async fn find_by_tenant(
    db: &impl ConnectionTrait,
    tenant_id: Id,
    trainer_id: Option<Id>,
    status: Option<StudentStatus>,
    sort: StudentSort,
) -> Result<Vec<(Model, Option<users::Model>)>, Error> {
    let mut query = Entity::find()
        .find_also_related(users::Entity)
        .filter(Column::TenantId.eq(tenant_id));

    if let Some(trainer_id) = trainer_id {
        query = query.filter(Column::TrainerId.eq(trainer_id));
    }
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status));
    }

    query = match sort {
        StudentSort::Name => query
            .order_by(users::Column::LastName, Order::Asc)
            .order_by(users::Column::FirstName, Order::Asc),
        StudentSort::CreatedAt => query.order_by(Column::CreatedAt, Order::Desc),
    };

    Ok(query.all(db).await?)
}

pub async fn find_with_user(
    db: &impl ConnectionTrait,
    id: Id,
) -> Result<(Model, users::Model), Error> {
    let student = find_by_id(db, id).await?;
    let user = user::find_by_id(db, student.user_id).await?;
    Ok((student, user))
}

pub async fn set_status(
    db: &impl ConnectionTrait,
    id: Id,
    status: StudentStatus,
) -> Result<Model, Error> {
    let student = find_by_id(db, id).await?;

    let active_model = ActiveModel {
        id: Unchanged(student.id),
        status: Set(status),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
}

pub async fn set_trainer(
    db: &impl ConnectionTrait,
    id: Id,
    trainer_id: Option<Id>,
) -> Result<Model, Error> {
    let student = find_by_id(db, id).await?;

    let active_model = ActiveModel {
        id: Unchanged(student.id),
        trainer_id: Set(trainer_id),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    #[tokio::test]
    async fn find_by_user_id_filters_on_user_id() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![Model {
                id: Id::new_v4(),
                tenant_id: Id::new_v4(),
                user_id: Id::new_v4(),
                trainer_id: None,
                status: StudentStatus::Active,
                birth_date: None,
                goal: None,
                notes: None,
                created_at: Utc::now().into(),
                updated_at: Utc::now().into(),
            }]])
            .into_connection();

        let user_id = Id::new_v4();
        let _ = find_by_user_id(&db, user_id).await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "students"."id", "students"."tenant_id", "students"."user_id", "students"."trainer_id", "students"."status", "students"."birth_date", "students"."goal", "students"."notes", "students"."created_at", "students"."updated_at" FROM "fitcoach_platform"."students" WHERE "students"."user_id" = $1 LIMIT $2"#,
                [user_id.into(), 1u64.into()]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn find_by_user_id_returns_not_found_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = find_by_user_id(&db, Id::new_v4()).await;
        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }
}
