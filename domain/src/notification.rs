use crate::gateway::expo::{ExpoClient, PushMessage};
use crate::{notification_kind::NotificationKind, users, Id};
use entity_api::notification;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;

pub use entity_api::notification::{find_by_user, mark_all_read, mark_read, unread_count};

/// Records an in-app notification for the recipient and attempts push
/// delivery when they have a registered Expo token. Best effort on both
/// counts: failures are logged and never surface to the triggering
/// operation.
pub async fn notify(
    db: &DatabaseConnection,
    config: &Config,
    tenant_id: Id,
    recipient: &users::Model,
    kind: NotificationKind,
    title: &str,
    body: &str,
) {
    if let Err(e) = notification::create(
        db,
        tenant_id,
        recipient.id,
        kind,
        title.to_string(),
        body.to_string(),
    )
    .await
    {
        warn!(
            "Failed to record notification for user {}: {e:?}",
            recipient.id
        );
    }

    if let Some(token) = &recipient.expo_push_token {
        let push = async {
            let client = ExpoClient::new(config)?;
            client
                .send_push(PushMessage::new(
                    token.clone(),
                    title.to_string(),
                    body.to_string(),
                ))
                .await
        };
        match push.await {
            Ok(ticket) if ticket.status == "ok" => {
                debug!("Push delivered to user {}", recipient.id)
            }
            Ok(ticket) => warn!(
                "Expo rejected push for user {}: {:?}",
                recipient.id, ticket.message
            ),
            Err(e) => warn!("Failed to send push to user {}: {e:?}", recipient.id),
        }
    }
}

