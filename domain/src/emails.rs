use crate::{
    error::{DomainErrorKind, Error, InternalErrorKind},
    gateway::resend::{ResendClient, SendEmailRequest},
    users,
};

use log::*;
use service::config::Config;

/// Sends the account-activation invitation to a newly created student.
pub async fn send_activation_email(
    config: &Config,
    user: &users::Model,
    token: &str,
) -> Result<(), Error> {
    info!(
        "Initiating activation email for user: {} ({})",
        user.email, user.id
    );

    let frontend_base_url = config.frontend_base_url().ok_or_else(|| {
        error!("Frontend base URL not configured; cannot build activation link");
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    })?;
    let activation_url = format!(
        "{}{}",
        frontend_base_url,
        config.activation_email_url_path().replace("{token}", token)
    );

    let client = ResendClient::new(config)?;
    let request = build_activation_email(
        config.email_from_address(),
        user,
        &activation_url,
    );
    client.send_email(request).await?;

    Ok(())
}

/// Notifies a tenant admin that an invoice payment failed.
pub async fn send_payment_failed_email(
    config: &Config,
    admin: &users::Model,
    tenant_name: &str,
) -> Result<(), Error> {
    info!("Sending payment-failed email to {}", admin.email);

    let client = ResendClient::new(config)?;
    let request = build_payment_failed_email(config.email_from_address(), admin, tenant_name);
    client.send_email(request).await?;

    Ok(())
}

fn build_activation_email(
    from: &str,
    user: &users::Model,
    activation_url: &str,
) -> SendEmailRequest {
    let subject = "You're invited to FitCoach".to_string();
    let html = format!(
        "<p>Hi {first_name},</p>\
         <p>Your trainer set up a FitCoach account for you. Activate it to choose \
         a password and get started:</p>\
         <p><a href=\"{url}\">Activate your account</a></p>\
         <p>This link is valid for 72 hours and can only be used once.</p>",
        first_name = user.first_name,
        url = activation_url,
    );
    let text = format!(
        "Hi {},\n\nYour trainer set up a FitCoach account for you. Activate it here \
         (valid for 72 hours, single use):\n\n{}\n",
        user.first_name, activation_url,
    );

    SendEmailRequest {
        from: from.to_string(),
        to: vec![user.email.clone()],
        subject,
        html: Some(html),
        text: Some(text),
    }
}

fn build_payment_failed_email(
    from: &str,
    admin: &users::Model,
    tenant_name: &str,
) -> SendEmailRequest {
    let subject = format!("Payment failed for {tenant_name}");
    let text = format!(
        "Hi {},\n\nThe latest subscription payment for {} failed. Please update \
         the payment method in your billing settings to avoid interruption.\n",
        admin.first_name, tenant_name,
    );

    SendEmailRequest {
        from: from.to_string(),
        to: vec![admin.email.clone()],
        subject,
        html: None,
        text: Some(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{roles::Role, Id};
    use chrono::Utc;

    fn test_user() -> users::Model {
        users::Model {
            id: Id::new_v4(),
            tenant_id: Some(Id::new_v4()),
            email: "jamie@example.com".to_string(),
            first_name: "Jamie".to_string(),
            last_name: "Park".to_string(),
            display_name: None,
            password: "hashed".to_string(),
            role: Role::Student,
            phone: None,
            avatar_url: None,
            timezone: "UTC".to_string(),
            expo_push_token: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn activation_email_contains_the_activation_link() {
        let user = test_user();
        let request = build_activation_email(
            "FitCoach <no-reply@fitcoach.app>",
            &user,
            "https://app.fitcoach.app/activate/abc123",
        );

        assert_eq!(request.to, vec!["jamie@example.com".to_string()]);
        assert!(request
            .html
            .as_deref()
            .unwrap()
            .contains("https://app.fitcoach.app/activate/abc123"));
        assert!(request
            .text
            .as_deref()
            .unwrap()
            .contains("https://app.fitcoach.app/activate/abc123"));
    }

    #[test]
    fn payment_failed_email_names_the_tenant() {
        let user = test_user();
        let request = build_payment_failed_email(
            "FitCoach <no-reply@fitcoach.app>",
            &user,
            "Iron Athletics",
        );

        assert_eq!(request.subject, "Payment failed for Iron Athletics");
        assert!(request.text.as_deref().unwrap().contains("Iron Athletics"));
    }
}
