use chrono::Utc;
use password_auth::generate_hash;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use entity::{
    exercises, roles::Role, schedule_event_status::ScheduleEventStatus, schedule_events,
    student_status::StudentStatus, students, tenant_status::TenantStatus, tenants, users,
    workouts,
};

/// Seeds a development database with a super admin, one tenant, a trainer,
/// two students and a sample training plan.
pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();

    let _super_admin: users::ActiveModel = users::ActiveModel {
        tenant_id: Set(None),
        email: Set("admin@fitcoach.app".to_owned()),
        first_name: Set("Platform".to_owned()),
        last_name: Set("Admin".to_owned()),
        display_name: Set(Some("Platform Admin".to_owned())),
        password: Set(generate_hash("kY8!mWq2&xv4Zr7p")),
        role: Set(Role::SuperAdmin),
        phone: Set(None),
        avatar_url: Set(None),
        timezone: Set("UTC".to_owned()),
        expo_push_token: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let iron_athletics = tenants::ActiveModel {
        name: Set("Iron Athletics".to_owned()),
        slug: Set("iron-athletics".to_owned()),
        status: Set(TenantStatus::Active),
        logo: Set(None),
        stripe_customer_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
    let tenant_id = iron_athletics.id.clone().unwrap();

    let _gym_admin = users::ActiveModel {
        tenant_id: Set(Some(tenant_id)),
        email: Set("owner@ironathletics.com".to_owned()),
        first_name: Set("Dana".to_owned()),
        last_name: Set("Reyes".to_owned()),
        display_name: Set(Some("Dana R.".to_owned())),
        password: Set(generate_hash("password")),
        role: Set(Role::Admin),
        phone: Set(None),
        avatar_url: Set(None),
        timezone: Set("America/Chicago".to_owned()),
        expo_push_token: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let trainer = users::ActiveModel {
        tenant_id: Set(Some(tenant_id)),
        email: Set("alex@ironathletics.com".to_owned()),
        first_name: Set("Alex".to_owned()),
        last_name: Set("Morgan".to_owned()),
        display_name: Set(Some("Coach Alex".to_owned())),
        password: Set(generate_hash("password")),
        role: Set(Role::Trainer),
        phone: Set(None),
        avatar_url: Set(None),
        timezone: Set("America/Chicago".to_owned()),
        expo_push_token: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
    let trainer_id = trainer.id.clone().unwrap();

    let student_user = users::ActiveModel {
        tenant_id: Set(Some(tenant_id)),
        email: Set("jamie@example.com".to_owned()),
        first_name: Set("Jamie".to_owned()),
        last_name: Set("Park".to_owned()),
        display_name: Set(None),
        password: Set(generate_hash("password")),
        role: Set(Role::Student),
        phone: Set(None),
        avatar_url: Set(None),
        timezone: Set("America/Chicago".to_owned()),
        expo_push_token: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let student = students::ActiveModel {
        tenant_id: Set(tenant_id),
        user_id: Set(student_user.id.clone().unwrap()),
        trainer_id: Set(Some(trainer_id)),
        status: Set(StudentStatus::Active),
        birth_date: Set(None),
        goal: Set(Some("Build strength for a first powerlifting meet".to_owned())),
        notes: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
    let student_id = student.id.clone().unwrap();

    let second_student_user = users::ActiveModel {
        tenant_id: Set(Some(tenant_id)),
        email: Set("rowan@example.com".to_owned()),
        first_name: Set("Rowan".to_owned()),
        last_name: Set("Diaz".to_owned()),
        display_name: Set(None),
        password: Set(generate_hash("password")),
        role: Set(Role::Student),
        phone: Set(None),
        avatar_url: Set(None),
        timezone: Set("America/Chicago".to_owned()),
        expo_push_token: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    students::ActiveModel {
        tenant_id: Set(tenant_id),
        user_id: Set(second_student_user.id.clone().unwrap()),
        trainer_id: Set(Some(trainer_id)),
        status: Set(StudentStatus::Active),
        birth_date: Set(None),
        goal: Set(Some("Drop 5kg before summer".to_owned())),
        notes: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();

    let workout = workouts::ActiveModel {
        tenant_id: Set(tenant_id),
        student_id: Set(student_id),
        name: Set("Lower Body A".to_owned()),
        description: Set(Some("Squat-focused strength day".to_owned())),
        weekdays: Set(serde_json::json!([1, 4])),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
    let workout_id = workout.id.clone().unwrap();

    for (position, (name, sets, reps)) in [
        ("Back Squat", 5, "5"),
        ("Romanian Deadlift", 3, "8-10"),
        ("Walking Lunge", 3, "12 per leg"),
    ]
    .into_iter()
    .enumerate()
    {
        exercises::ActiveModel {
            workout_id: Set(workout_id),
            name: Set(name.to_owned()),
            sets: Set(sets),
            reps: Set(reps.to_owned()),
            rest_seconds: Set(Some(120)),
            load: Set(None),
            video_url: Set(None),
            position: Set(position as i32),
            notes: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .save(db)
        .await
        .unwrap();
    }

    schedule_events::ActiveModel {
        tenant_id: Set(tenant_id),
        trainer_id: Set(trainer_id),
        student_id: Set(student_id),
        title: Set("Form check: squat".to_owned()),
        starts_at: Set((now + chrono::Duration::days(2)).into()),
        ends_at: Set((now + chrono::Duration::days(2) + chrono::Duration::hours(1)).into()),
        status: Set(ScheduleEventStatus::Scheduled),
        location: Set(Some("Main floor".to_owned())),
        notes: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    }
    .save(db)
    .await
    .unwrap();
}
