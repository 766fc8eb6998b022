use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_users_tenant_id", "users", "tenant_id"),
    ("idx_students_tenant_id", "students", "tenant_id"),
    ("idx_students_trainer_id", "students", "trainer_id"),
    ("idx_workouts_student_id", "workouts", "student_id"),
    ("idx_exercises_workout_id", "exercises", "workout_id"),
    ("idx_workout_logs_student_id", "workout_logs", "student_id"),
    ("idx_schedule_events_tenant_starts", "schedule_events", "tenant_id, starts_at"),
    ("idx_schedule_events_trainer_id", "schedule_events", "trainer_id"),
    ("idx_schedule_events_student_id", "schedule_events", "student_id"),
    ("idx_messages_recipient_read", "messages", "recipient_id, read_at"),
    ("idx_messages_sender_created", "messages", "sender_id, created_at"),
    ("idx_body_measurements_student", "body_measurements", "student_id, measured_on"),
    ("idx_physical_assessments_student", "physical_assessments", "student_id, assessed_on"),
    ("idx_notifications_user_read", "notifications", "user_id, read_at"),
    ("idx_activation_tokens_user_id", "activation_tokens", "user_id"),
    ("idx_audit_logs_tenant_created", "audit_logs", "tenant_id, created_at"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, columns) in INDEXES {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "CREATE INDEX IF NOT EXISTS {name} ON fitcoach_platform.{table} ({columns});"
                ))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _, _) in INDEXES {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "DROP INDEX IF EXISTS fitcoach_platform.{name};"
                ))
                .await?;
        }

        Ok(())
    }
}
