use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{IntoUpdateMap, UpdateMap};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpdateParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub timezone: Option<String>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(first_name) = self.first_name {
            update_map.insert(
                "first_name".to_string(),
                Some(Value::String(Some(Box::new(first_name)))),
            );
        }
        if let Some(last_name) = self.last_name {
            update_map.insert(
                "last_name".to_string(),
                Some(Value::String(Some(Box::new(last_name)))),
            );
        }
        if let Some(display_name) = self.display_name {
            update_map.insert(
                "display_name".to_string(),
                Some(Value::String(Some(Box::new(display_name)))),
            );
        }
        if let Some(phone) = self.phone {
            update_map.insert(
                "phone".to_string(),
                Some(Value::String(Some(Box::new(phone)))),
            );
        }
        if let Some(avatar_url) = self.avatar_url {
            update_map.insert(
                "avatar_url".to_string(),
                Some(Value::String(Some(Box::new(avatar_url)))),
            );
        }
        if let Some(timezone) = self.timezone {
            update_map.insert(
                "timezone".to_string(),
                Some(Value::String(Some(Box::new(timezone)))),
            );
        }
        update_map
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpdatePasswordParams {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PushTokenParams {
    /// The Expo push token to register, or null to clear the registration.
    pub expo_push_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_params_map_only_provided_fields() {
        let params = UpdateParams {
            first_name: Some("Jamie".to_string()),
            last_name: None,
            display_name: None,
            phone: None,
            avatar_url: None,
            timezone: Some("America/Chicago".to_string()),
        };

        let update_map = params.into_update_map();
        assert!(update_map.get("first_name").is_some());
        assert!(update_map.get("timezone").is_some());
        assert!(update_map.get("last_name").is_none());
        assert!(update_map.get("phone").is_none());
    }
}
