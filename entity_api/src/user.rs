use super::error::{EntityApiErrorKind, Error};
use async_trait::async_trait;
use axum_login::{AuthnBackend, UserId};
use chrono::Utc;

use entity::users::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use password_auth;
use sea_orm::{
    entity::prelude::*, ActiveValue::Unchanged, ConnectionTrait, DatabaseConnection, QueryOrder,
    Set,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

pub use entity::roles::Role;

pub async fn create(db: &impl ConnectionTrait, user_model: Model) -> Result<Model, Error> {
    debug!("New User Model to be inserted: {user_model:?}");

    let now = Utc::now();
    let user_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(user_model.tenant_id),
        email: Set(user_model.email),
        first_name: Set(user_model.first_name),
        last_name: Set(user_model.last_name),
        display_name: Set(user_model.display_name),
        password: Set(generate_hash(user_model.password)),
        role: Set(user_model.role),
        phone: Set(user_model.phone),
        avatar_url: Set(user_model.avatar_url),
        timezone: Set(user_model.timezone),
        expo_push_token: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(user_active_model.insert(db).await?)
}

pub async fn find_by_email(db: &impl ConnectionTrait, email: &str) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_tenant(
    db: &impl ConnectionTrait,
    tenant_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .all(db)
        .await?)
}

pub async fn find_by_tenant_and_role(
    db: &impl ConnectionTrait,
    tenant_id: Id,
    role: Role,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::TenantId.eq(tenant_id))
        .filter(Column::Role.eq(role))
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .all(db)
        .await?)
}

/// Replaces the user's password hash. Because the session auth hash is
/// derived from the password hash, this invalidates existing sessions.
pub async fn update_password(
    db: &impl ConnectionTrait,
    user_id: Id,
    new_password: String,
) -> Result<Model, Error> {
    let user = find_by_id(db, user_id).await?;

    let active_model = ActiveModel {
        id: Unchanged(user.id),
        password: Set(generate_hash(new_password)),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
}

pub async fn set_expo_push_token(
    db: &impl ConnectionTrait,
    user_id: Id,
    expo_push_token: Option<String>,
) -> Result<Model, Error> {
    let user = find_by_id(db, user_id).await?;

    let active_model = ActiveModel {
        id: Unchanged(user.id),
        expo_push_token: Set(expo_push_token),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
}

pub async fn delete(db: &impl ConnectionTrait, user_id: Id) -> Result<(), Error> {
    Entity::delete_by_id(user_id).exec(db).await?;
    Ok(())
}

pub async fn verify_password(password_to_verify: &str, password_hash: &str) -> Result<(), Error> {
    match password_auth::verify_password(password_to_verify, password_hash) {
        Ok(_) => Ok(()),
        Err(_) => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordUnauthenticated,
        }),
    }
}

pub fn generate_hash(password: String) -> String {
    password_auth::generate_hash(password)
}

async fn authenticate_user(creds: Credentials, user: Model) -> Result<Option<Model>, Error> {
    match password_auth::verify_password(creds.password, &user.password) {
        Ok(_) => Ok(Some(user)),
        Err(_) => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordUnauthenticated,
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Backend {
    db: Arc<DatabaseConnection>,
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[schema(as = domain::user::Credentials)] // OpenAPI schema
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Backend {
    pub fn new(db: &Arc<DatabaseConnection>) -> Self {
        Self { db: Arc::clone(db) }
    }
}

#[async_trait]
impl AuthnBackend for Backend {
    type User = Model;
    type Credentials = Credentials;
    type Error = Error;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        debug!("Authenticating user with email: {}", creds.email);

        match find_by_email(self.db.as_ref(), &creds.email).await? {
            Some(user) => authenticate_user(creds, user).await,
            None => Err(Error {
                source: None,
                error_kind: EntityApiErrorKind::RecordUnauthenticated,
            }),
        }
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        Ok(Entity::find_by_id(*user_id).one(self.db.as_ref()).await?)
    }
}

pub type AuthSession = axum_login::AuthSession<Backend>;

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction};

    #[tokio::test]
    async fn find_by_email_queries_on_the_email_column() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let _ = find_by_email(&db, "trainer@ironathletics.com").await?;

        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "users"."id", "users"."tenant_id", "users"."email", "users"."first_name", "users"."last_name", "users"."display_name", "users"."password", "users"."role", "users"."phone", "users"."avatar_url", "users"."timezone", "users"."expo_push_token", "users"."created_at", "users"."updated_at" FROM "fitcoach_platform"."users" WHERE "users"."email" = $1 LIMIT $2"#,
                ["trainer@ironathletics.com".into(), 1u64.into()]
            )]
        );

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_user_rejects_a_wrong_password() {
        let now = Utc::now();
        let user = Model {
            id: Id::new_v4(),
            tenant_id: Some(Id::new_v4()),
            email: "trainer@ironathletics.com".to_owned(),
            first_name: "Alex".to_owned(),
            last_name: "Morgan".to_owned(),
            display_name: None,
            password: generate_hash("correct horse".to_owned()),
            role: Role::Trainer,
            phone: None,
            avatar_url: None,
            timezone: "UTC".to_owned(),
            expo_push_token: None,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let creds = Credentials {
            email: user.email.clone(),
            password: "battery staple".to_owned(),
        };

        let result = authenticate_user(creds, user).await;
        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordUnauthenticated
        );
    }

    #[tokio::test]
    async fn authenticate_user_accepts_the_correct_password() {
        let now = Utc::now();
        let user = Model {
            id: Id::new_v4(),
            tenant_id: Some(Id::new_v4()),
            email: "trainer@ironathletics.com".to_owned(),
            first_name: "Alex".to_owned(),
            last_name: "Morgan".to_owned(),
            display_name: None,
            password: generate_hash("correct horse".to_owned()),
            role: Role::Trainer,
            phone: None,
            avatar_url: None,
            timezone: "UTC".to_owned(),
            expo_push_token: None,
            created_at: now.into(),
            updated_at: now.into(),
        };

        let creds = Credentials {
            email: user.email.clone(),
            password: "correct horse".to_owned(),
        };

        let authenticated = authenticate_user(creds, user.clone()).await.unwrap();
        assert_eq!(authenticated, Some(user));
    }
}
