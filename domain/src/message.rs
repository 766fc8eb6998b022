use crate::error::Error;
use crate::{
    messages, notification, notification_kind::NotificationKind, roles::Role, users, Id,
};
use chrono::{DateTime, FixedOffset};
use entity_api::{message, student, user};
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;

/// Longest allowed message body.
pub const MAX_BODY_CHARS: usize = 4000;

const DEFAULT_PAGE_SIZE: u64 = 50;
const MAX_PAGE_SIZE: u64 = 200;

/// Validates a message body: non-empty after trimming, bounded length.
pub fn validate_body(body: &str) -> Result<(), Error> {
    if body.trim().is_empty() {
        return Err(Error::invalid("message body must not be empty"));
    }
    if body.chars().count() > MAX_BODY_CHARS {
        return Err(Error::invalid("message body exceeds 4000 characters"));
    }
    Ok(())
}

/// Sends an in-app message and notifies the recipient.
pub async fn send(
    db: &DatabaseConnection,
    config: &Config,
    sender: &users::Model,
    recipient_id: Id,
    body: String,
) -> Result<messages::Model, Error> {
    validate_body(&body)?;

    let recipient = user::find_by_id(db, recipient_id).await?;
    authorize_conversation(db, sender, &recipient).await?;

    let tenant_id = sender
        .tenant_id
        .ok_or_else(|| Error::forbidden("sender is not bound to a tenant"))?;

    let message = message::create(
        db,
        messages::Model {
            id: Id::default(),
            tenant_id,
            sender_id: sender.id,
            recipient_id,
            body,
            read_at: None,
            created_at: chrono::Utc::now().into(),
        },
    )
    .await?;

    let sender_name = sender
        .display_name
        .clone()
        .unwrap_or_else(|| sender.full_name());
    notification::notify(
        db,
        config,
        tenant_id,
        &recipient,
        NotificationKind::Message,
        &format!("New message from {sender_name}"),
        preview(&message.body),
    )
    .await;

    Ok(message)
}

/// The caller's conversation with one counterpart, newest first.
pub async fn conversation(
    db: &DatabaseConnection,
    caller: &users::Model,
    counterpart_id: Id,
    before: Option<DateTime<FixedOffset>>,
    limit: Option<u64>,
) -> Result<Vec<messages::Model>, Error> {
    let counterpart = user::find_by_id(db, counterpart_id).await?;
    authorize_conversation(db, caller, &counterpart).await?;

    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    Ok(message::conversation(db, caller.id, counterpart_id, before, limit).await?)
}

/// Marks every unread message from the counterpart to the caller as read.
pub async fn mark_conversation_read(
    db: &DatabaseConnection,
    caller: &users::Model,
    counterpart_id: Id,
) -> Result<u64, Error> {
    let updated = message::mark_conversation_read(db, caller.id, counterpart_id).await?;
    debug!(
        "Marked {updated} message(s) read for user {} from {counterpart_id}",
        caller.id
    );
    Ok(updated)
}

pub async fn unread_total(db: &DatabaseConnection, caller: &users::Model) -> Result<u64, Error> {
    Ok(message::unread_count(db, caller.id).await?)
}

pub async fn unread_counts_by_sender(
    db: &DatabaseConnection,
    caller: &users::Model,
) -> Result<Vec<(Id, i64)>, Error> {
    Ok(message::unread_counts_by_sender(db, caller.id).await?)
}

/// Chat pairs trainers with their assigned students; admins can reach
/// anyone in their tenant.
async fn authorize_conversation(
    db: &DatabaseConnection,
    sender: &users::Model,
    recipient: &users::Model,
) -> Result<(), Error> {
    if sender.tenant_id.is_none() || sender.tenant_id != recipient.tenant_id {
        return Err(Error::forbidden(
            "messages can only be exchanged within a tenant",
        ));
    }

    match sender.role {
        Role::Admin => Ok(()),
        Role::Trainer => {
            // Admins are reachable by anyone in-tenant.
            if recipient.role == Role::Admin {
                return Ok(());
            }
            let student = student::find_by_user_id(db, recipient.id).await.map_err(|_| {
                Error::forbidden("trainers can only message their assigned students")
            })?;
            if student.trainer_id == Some(sender.id) {
                Ok(())
            } else {
                Err(Error::forbidden(
                    "trainers can only message their assigned students",
                ))
            }
        }
        Role::Student => {
            if recipient.role == Role::Admin {
                return Ok(());
            }
            let student = student::find_by_user_id(db, sender.id).await?;
            if student.trainer_id == Some(recipient.id) {
                Ok(())
            } else {
                Err(Error::forbidden(
                    "students can only message their assigned trainer",
                ))
            }
        }
        Role::SuperAdmin => Err(Error::forbidden("super admins do not participate in chat")),
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(140) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_validation_rejects_empty_and_oversized_bodies() {
        assert!(validate_body("hello").is_ok());
        assert!(validate_body("").is_err());
        assert!(validate_body("   ").is_err());
        assert!(validate_body(&"x".repeat(MAX_BODY_CHARS)).is_ok());
        assert!(validate_body(&"x".repeat(MAX_BODY_CHARS + 1)).is_err());
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        let short = "hello";
        assert_eq!(preview(short), "hello");

        let long = "é".repeat(200);
        let truncated = preview(&long);
        assert_eq!(truncated.chars().count(), 140);
    }
}
