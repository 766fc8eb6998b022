use crate::error::Error;
use crate::{
    activation_tokens, audit, roles::Role, student_status::StudentStatus, students, users, Id,
};
use entity_api::{activation_token, mutate, student, user};
use log::*;
use sea_orm::{DatabaseConnection, IntoActiveModel, TransactionTrait};
use serde_json::json;

pub use entity_api::student::{find_by_id, find_by_user_id, find_with_user, StudentSort};

/// Whether `user` is allowed to see and act on `student`'s records.
///
/// Admins see every student in their tenant, trainers only the students
/// assigned to them, students only themselves.
pub fn can_access(user: &users::Model, student: &students::Model) -> bool {
    match user.role {
        Role::SuperAdmin => true,
        Role::Admin => user.tenant_id == Some(student.tenant_id),
        Role::Trainer => {
            user.tenant_id == Some(student.tenant_id) && student.trainer_id == Some(user.id)
        }
        Role::Student => student.user_id == user.id,
    }
}

/// Invites a new student: creates their user account and student record,
/// issues an activation token, and records the invitation in the audit log.
/// The caller is responsible for sending the activation email.
pub async fn invite(
    db: &DatabaseConnection,
    actor: &users::Model,
    tenant_id: Id,
    user_model: users::Model,
    mut student_model: students::Model,
) -> Result<(students::Model, users::Model, activation_tokens::Model), Error> {
    if let Some(existing) = user::find_by_email(db, &user_model.email).await? {
        warn!("Invitation rejected, email already registered: {}", existing.email);
        return Err(Error::invalid("email is already registered"));
    }

    if let Some(trainer_id) = student_model.trainer_id {
        validate_trainer(db, tenant_id, trainer_id).await?;
    }

    student_model.tenant_id = tenant_id;
    let (user, student, token) = student::create_with_user(db, user_model, student_model).await?;

    audit::record_best_effort(
        db,
        Some(tenant_id),
        Some(actor.id),
        "student.create",
        "student",
        Some(student.id),
        json!({ "email": user.email, "trainer_id": student.trainer_id }),
    )
    .await;

    Ok((student, user, token))
}

/// Returns the invitee behind a valid activation token, for rendering the
/// activation form. Invalid, used and expired tokens are indistinguishable.
pub async fn activation_preview(
    db: &DatabaseConnection,
    token_str: &str,
) -> Result<users::Model, Error> {
    let token = activation_token::find_valid(db, token_str).await?;
    Ok(user::find_by_id(db, token.user_id).await?)
}

/// Completes the activation flow: sets the password, consumes the token and
/// activates the student, all in one transaction.
pub async fn activate(
    db: &DatabaseConnection,
    token_str: &str,
    new_password: String,
) -> Result<users::Model, Error> {
    if new_password.len() < 8 {
        return Err(Error::invalid("password must be at least 8 characters"));
    }

    let token = activation_token::find_valid(db, token_str).await?;
    let student = student::find_by_user_id(db, token.user_id).await?;

    let txn = db.begin().await?;
    user::update_password(&txn, token.user_id, new_password).await?;
    activation_token::mark_used(&txn, token.id).await?;
    student::set_status(&txn, student.id, StudentStatus::Active).await?;
    txn.commit().await?;

    let user = user::find_by_id(db, token.user_id).await?;
    info!("Student account activated for {}", user.email);

    audit::record_best_effort(
        db,
        user.tenant_id,
        Some(user.id),
        "student.activate",
        "student",
        Some(student.id),
        json!({}),
    )
    .await;

    Ok(user)
}

/// Re-issues an activation token for a still-pending student, invalidating
/// any earlier ones.
pub async fn reissue_activation(
    db: &DatabaseConnection,
    actor: &users::Model,
    student_id: Id,
) -> Result<(users::Model, activation_tokens::Model), Error> {
    let (student, user) = student::find_with_user(db, student_id).await?;
    if student.status != StudentStatus::Pending {
        return Err(Error::invalid("student is not pending activation"));
    }

    let token = activation_token::issue(db, user.id).await?;

    audit::record_best_effort(
        db,
        Some(student.tenant_id),
        Some(actor.id),
        "student.reinvite",
        "student",
        Some(student.id),
        json!({ "email": user.email }),
    )
    .await;

    Ok((user, token))
}

pub async fn find_by_tenant(
    db: &DatabaseConnection,
    tenant_id: Id,
    trainer_id: Option<Id>,
    status: Option<StudentStatus>,
    sort: StudentSort,
) -> Result<Vec<(students::Model, Option<users::Model>)>, Error> {
    Ok(student::find_by_tenant(db, tenant_id, trainer_id, status, sort).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    student_id: Id,
    params: impl mutate::IntoUpdateMap + std::fmt::Debug,
) -> Result<students::Model, Error> {
    debug!("Updating student {student_id} with {params:?}");
    let existing = student::find_by_id(db, student_id).await?;
    let active_model = existing.into_active_model();
    Ok(
        mutate::update::<students::ActiveModel, students::Column>(
            db,
            active_model,
            params.into_update_map(),
        )
        .await?,
    )
}

/// Archives a student (sets status `inactive`). Their data is retained.
pub async fn archive(
    db: &DatabaseConnection,
    actor: &users::Model,
    student_id: Id,
) -> Result<students::Model, Error> {
    let student = student::set_status(db, student_id, StudentStatus::Inactive).await?;

    audit::record_best_effort(
        db,
        Some(student.tenant_id),
        Some(actor.id),
        "student.archive",
        "student",
        Some(student.id),
        json!({}),
    )
    .await;

    Ok(student)
}

/// Reassigns a student to a different trainer (or unassigns with None).
pub async fn reassign_trainer(
    db: &DatabaseConnection,
    actor: &users::Model,
    student_id: Id,
    trainer_id: Option<Id>,
) -> Result<students::Model, Error> {
    let student = student::find_by_id(db, student_id).await?;
    if let Some(trainer_id) = trainer_id {
        validate_trainer(db, student.tenant_id, trainer_id).await?;
    }

    let student = student::set_trainer(db, student_id, trainer_id).await?;

    audit::record_best_effort(
        db,
        Some(student.tenant_id),
        Some(actor.id),
        "student.reassign_trainer",
        "student",
        Some(student.id),
        json!({ "trainer_id": trainer_id }),
    )
    .await;

    Ok(student)
}

/// A trainer reference must point at a trainer (or admin) in the same tenant.
async fn validate_trainer(
    db: &DatabaseConnection,
    tenant_id: Id,
    trainer_id: Id,
) -> Result<(), Error> {
    let trainer = user::find_by_id(db, trainer_id).await?;
    if trainer.tenant_id != Some(tenant_id)
        || !matches!(trainer.role, Role::Trainer | Role::Admin)
    {
        return Err(Error::invalid("trainer must be a trainer in the same tenant"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with(role: Role, tenant_id: Option<Id>) -> users::Model {
        users::Model {
            id: Id::new_v4(),
            tenant_id,
            email: "user@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            display_name: None,
            password: "hashed".to_string(),
            role,
            phone: None,
            avatar_url: None,
            timezone: "UTC".to_string(),
            expo_push_token: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn student_in(tenant_id: Id) -> students::Model {
        students::Model {
            id: Id::new_v4(),
            tenant_id,
            user_id: Id::new_v4(),
            trainer_id: None,
            status: StudentStatus::Active,
            birth_date: None,
            goal: None,
            notes: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn admins_access_students_only_in_their_own_tenant() {
        let tenant_id = Id::new_v4();
        let admin = user_with(Role::Admin, Some(tenant_id));
        let student = student_in(tenant_id);
        let foreign_student = student_in(Id::new_v4());

        assert!(can_access(&admin, &student));
        assert!(!can_access(&admin, &foreign_student));
    }

    #[test]
    fn trainers_access_only_their_assigned_students() {
        let tenant_id = Id::new_v4();
        let trainer = user_with(Role::Trainer, Some(tenant_id));
        let mut assigned = student_in(tenant_id);
        assigned.trainer_id = Some(trainer.id);
        let unassigned = student_in(tenant_id);

        assert!(can_access(&trainer, &assigned));
        assert!(!can_access(&trainer, &unassigned));
    }

    #[test]
    fn students_access_only_their_own_record() {
        let tenant_id = Id::new_v4();
        let student_user = user_with(Role::Student, Some(tenant_id));
        let mut own = student_in(tenant_id);
        own.user_id = student_user.id;
        let other = student_in(tenant_id);

        assert!(can_access(&student_user, &own));
        assert!(!can_access(&student_user, &other));
    }

    #[test]
    fn super_admins_access_everything() {
        let super_admin = user_with(Role::SuperAdmin, None);
        let student = student_in(Id::new_v4());

        assert!(can_access(&super_admin, &student));
    }
}
