use super::error::{EntityApiErrorKind, Error};
use chrono::{Duration, Utc};
use entity::{
    activation_tokens::{ActiveModel, Column, Entity, Model},
    Id,
};
use rand::RngCore;
use sea_orm::{
    entity::prelude::*, sea_query::Expr, ActiveValue::Set, ActiveValue::Unchanged,
    ConnectionTrait,
};

use log::*;

/// Invitation tokens are valid for 72 hours.
pub const TOKEN_TTL_HOURS: i64 = 72;

/// 32 CSPRNG bytes, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Issues a fresh activation token for the user. Any outstanding tokens for
/// the same user are invalidated first, so at most one token is live.
pub async fn issue(db: &impl ConnectionTrait, user_id: Id) -> Result<Model, Error> {
    let now = Utc::now();

    let invalidated = Entity::update_many()
        .col_expr(Column::UsedAt, Expr::value(Some(DateTimeWithTimeZone::from(now))))
        .filter(Column::UserId.eq(user_id))
        .filter(Column::UsedAt.is_null())
        .exec(db)
        .await?;
    if invalidated.rows_affected > 0 {
        debug!(
            "Invalidated {} outstanding activation token(s) for user {user_id}",
            invalidated.rows_affected
        );
    }

    let token_active_model = ActiveModel {
        user_id: Set(user_id),
        token: Set(generate_token()),
        expires_at: Set((now + Duration::hours(TOKEN_TTL_HOURS)).into()),
        used_at: Set(None),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(token_active_model.insert(db).await?)
}

pub async fn find_by_token(
    db: &impl ConnectionTrait,
    token: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find().filter(Column::Token.eq(token)).one(db).await?)
}

/// Looks up a token that is present, unused and unexpired. All three
/// failure cases collapse to `RecordNotFound` so callers cannot tell them
/// apart.
pub async fn find_valid(db: &impl ConnectionTrait, token: &str) -> Result<Model, Error> {
    let now = Utc::now();
    match find_by_token(db, token).await? {
        Some(model) if model.used_at.is_none() && model.expires_at > now => Ok(model),
        _ => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        }),
    }
}

pub async fn mark_used(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let active_model = ActiveModel {
        id: Unchanged(id),
        used_at: Set(Some(Utc::now().into())),
        ..Default::default()
    };
    Ok(active_model.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_token_produces_64_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generate_token_is_not_constant() {
        assert_ne!(generate_token(), generate_token());
    }
}
