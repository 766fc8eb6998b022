use sea_orm::{EnumIter, Iterable};
use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
struct Role;

#[derive(DeriveIden, EnumIter)]
enum RoleVariants {
    SuperAdmin,
    Admin,
    Trainer,
    Student,
}

#[derive(DeriveIden)]
struct TenantStatus;

#[derive(DeriveIden, EnumIter)]
enum TenantStatusVariants {
    Active,
    Suspended,
}

#[derive(DeriveIden)]
struct StudentStatus;

#[derive(DeriveIden, EnumIter)]
enum StudentStatusVariants {
    Pending,
    Active,
    Inactive,
}

#[derive(DeriveIden)]
struct ScheduleEventStatus;

#[derive(DeriveIden, EnumIter)]
enum ScheduleEventStatusVariants {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(DeriveIden)]
struct NotificationKind;

#[derive(DeriveIden, EnumIter)]
enum NotificationKindVariants {
    Message,
    Schedule,
    Workout,
    Billing,
    System,
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
    Name,
    Slug,
    Status,
    Logo,
    StripeCustomerId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    TenantId,
    Email,
    FirstName,
    LastName,
    DisplayName,
    Password,
    Role,
    Phone,
    AvatarUrl,
    Timezone,
    ExpoPushToken,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    TenantId,
    UserId,
    TrainerId,
    Status,
    BirthDate,
    Goal,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ActivationTokens {
    Table,
    Id,
    UserId,
    Token,
    ExpiresAt,
    UsedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Workouts {
    Table,
    Id,
    TenantId,
    StudentId,
    Name,
    Description,
    Weekdays,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Exercises {
    Table,
    Id,
    WorkoutId,
    Name,
    Sets,
    Reps,
    RestSeconds,
    Load,
    VideoUrl,
    Position,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WorkoutLogs {
    Table,
    Id,
    TenantId,
    StudentId,
    WorkoutId,
    LoggedOn,
    DurationMinutes,
    PerceivedEffort,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ScheduleEvents {
    Table,
    Id,
    TenantId,
    TrainerId,
    StudentId,
    Title,
    StartsAt,
    EndsAt,
    Status,
    Location,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    TenantId,
    SenderId,
    RecipientId,
    Body,
    ReadAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BodyMeasurements {
    Table,
    Id,
    TenantId,
    StudentId,
    MeasuredOn,
    WeightKg,
    BodyFatPercent,
    ChestCm,
    WaistCm,
    HipCm,
    ArmCm,
    ThighCm,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PhysicalAssessments {
    Table,
    Id,
    TenantId,
    StudentId,
    AssessedOn,
    RestingHeartRate,
    BloodPressure,
    Vo2Max,
    FlexibilityScore,
    PostureNotes,
    Protocol,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    TenantId,
    UserId,
    Kind,
    Title,
    Body,
    ReadAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    TenantId,
    UserId,
    Action,
    EntityType,
    EntityId,
    Detail,
    CreatedAt,
}

fn uuid_pk() -> ColumnDef {
    let mut col = ColumnDef::new(Alias::new("id"));
    col.uuid()
        .not_null()
        .primary_key()
        .default(Expr::cust("gen_random_uuid()"));
    col
}

fn timestamptz(name: impl IntoIden) -> ColumnDef {
    let mut col = ColumnDef::new(name);
    col.timestamp_with_time_zone()
        .not_null()
        .default(Expr::cust("now()"));
    col
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("SET search_path TO fitcoach_platform, public;")
            .await?;

        // Enums
        manager
            .create_type(
                Type::create()
                    .as_enum(Role)
                    .values(RoleVariants::iter())
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(TenantStatus)
                    .values(TenantStatusVariants::iter())
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(StudentStatus)
                    .values(StudentStatusVariants::iter())
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(ScheduleEventStatus)
                    .values(ScheduleEventStatusVariants::iter())
                    .to_owned(),
            )
            .await?;
        manager
            .create_type(
                Type::create()
                    .as_enum(NotificationKind)
                    .values(NotificationKindVariants::iter())
                    .to_owned(),
            )
            .await?;

        // Tenants
        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Tenants::Name).string().not_null())
                    .col(
                        ColumnDef::new(Tenants::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Tenants::Status)
                            .custom("fitcoach_platform.tenant_status")
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Tenants::Logo).string())
                    .col(
                        ColumnDef::new(Tenants::StripeCustomerId)
                            .string()
                            .unique_key(),
                    )
                    .col(&mut timestamptz(Tenants::CreatedAt))
                    .col(&mut timestamptz(Tenants::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Users::TenantId).uuid())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::DisplayName).string())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .custom("fitcoach_platform.role")
                            .not_null()
                            .default("student"),
                    )
                    .col(ColumnDef::new(Users::Phone).string())
                    .col(ColumnDef::new(Users::AvatarUrl).string())
                    .col(
                        ColumnDef::new(Users::Timezone)
                            .string()
                            .not_null()
                            .default("UTC"),
                    )
                    .col(ColumnDef::new(Users::ExpoPushToken).string())
                    .col(&mut timestamptz(Users::CreatedAt))
                    .col(&mut timestamptz(Users::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Users::Table, Users::TenantId)
                            .to(Tenants::Table, Tenants::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Students
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Students::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Students::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::TrainerId).uuid())
                    .col(
                        ColumnDef::new(Students::Status)
                            .custom("fitcoach_platform.student_status")
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Students::BirthDate).date())
                    .col(ColumnDef::new(Students::Goal).text())
                    .col(ColumnDef::new(Students::Notes).text())
                    .col(&mut timestamptz(Students::CreatedAt))
                    .col(&mut timestamptz(Students::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::TenantId)
                            .to(Tenants::Table, Tenants::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::TrainerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Activation tokens
        manager
            .create_table(
                Table::create()
                    .table(ActivationTokens::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(ActivationTokens::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(ActivationTokens::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ActivationTokens::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivationTokens::UsedAt).timestamp_with_time_zone())
                    .col(&mut timestamptz(ActivationTokens::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActivationTokens::Table, ActivationTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Workouts
        manager
            .create_table(
                Table::create()
                    .table(Workouts::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Workouts::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Workouts::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Workouts::Name).string().not_null())
                    .col(ColumnDef::new(Workouts::Description).text())
                    .col(
                        ColumnDef::new(Workouts::Weekdays)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Workouts::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(&mut timestamptz(Workouts::CreatedAt))
                    .col(&mut timestamptz(Workouts::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Workouts::Table, Workouts::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Exercises
        manager
            .create_table(
                Table::create()
                    .table(Exercises::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Exercises::WorkoutId).uuid().not_null())
                    .col(ColumnDef::new(Exercises::Name).string().not_null())
                    .col(ColumnDef::new(Exercises::Sets).integer().not_null())
                    .col(ColumnDef::new(Exercises::Reps).string().not_null())
                    .col(ColumnDef::new(Exercises::RestSeconds).integer())
                    .col(ColumnDef::new(Exercises::Load).string())
                    .col(ColumnDef::new(Exercises::VideoUrl).string())
                    .col(
                        ColumnDef::new(Exercises::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Exercises::Notes).text())
                    .col(&mut timestamptz(Exercises::CreatedAt))
                    .col(&mut timestamptz(Exercises::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exercises::Table, Exercises::WorkoutId)
                            .to(Workouts::Table, Workouts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Workout logs
        manager
            .create_table(
                Table::create()
                    .table(WorkoutLogs::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(WorkoutLogs::TenantId).uuid().not_null())
                    .col(ColumnDef::new(WorkoutLogs::StudentId).uuid().not_null())
                    .col(ColumnDef::new(WorkoutLogs::WorkoutId).uuid().not_null())
                    .col(ColumnDef::new(WorkoutLogs::LoggedOn).date().not_null())
                    .col(ColumnDef::new(WorkoutLogs::DurationMinutes).integer())
                    .col(ColumnDef::new(WorkoutLogs::PerceivedEffort).integer())
                    .col(ColumnDef::new(WorkoutLogs::Comment).text())
                    .col(&mut timestamptz(WorkoutLogs::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(WorkoutLogs::Table, WorkoutLogs::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(WorkoutLogs::Table, WorkoutLogs::WorkoutId)
                            .to(Workouts::Table, Workouts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One log per workout per calendar day.
        manager
            .create_index(
                Index::create()
                    .name("idx_workout_logs_unique_per_day")
                    .table(WorkoutLogs::Table)
                    .col(WorkoutLogs::StudentId)
                    .col(WorkoutLogs::WorkoutId)
                    .col(WorkoutLogs::LoggedOn)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Schedule events
        manager
            .create_table(
                Table::create()
                    .table(ScheduleEvents::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(ScheduleEvents::TenantId).uuid().not_null())
                    .col(ColumnDef::new(ScheduleEvents::TrainerId).uuid().not_null())
                    .col(ColumnDef::new(ScheduleEvents::StudentId).uuid().not_null())
                    .col(ColumnDef::new(ScheduleEvents::Title).string().not_null())
                    .col(
                        ColumnDef::new(ScheduleEvents::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleEvents::EndsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduleEvents::Status)
                            .custom("fitcoach_platform.schedule_event_status")
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(ScheduleEvents::Location).string())
                    .col(ColumnDef::new(ScheduleEvents::Notes).text())
                    .col(&mut timestamptz(ScheduleEvents::CreatedAt))
                    .col(&mut timestamptz(ScheduleEvents::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScheduleEvents::Table, ScheduleEvents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScheduleEvents::Table, ScheduleEvents::TrainerId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Messages
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Messages::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Messages::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Messages::RecipientId).uuid().not_null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::ReadAt).timestamp_with_time_zone())
                    .col(&mut timestamptz(Messages::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Body measurements
        manager
            .create_table(
                Table::create()
                    .table(BodyMeasurements::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(BodyMeasurements::TenantId).uuid().not_null())
                    .col(
                        ColumnDef::new(BodyMeasurements::StudentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BodyMeasurements::MeasuredOn)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BodyMeasurements::WeightKg)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BodyMeasurements::BodyFatPercent).double())
                    .col(ColumnDef::new(BodyMeasurements::ChestCm).double())
                    .col(ColumnDef::new(BodyMeasurements::WaistCm).double())
                    .col(ColumnDef::new(BodyMeasurements::HipCm).double())
                    .col(ColumnDef::new(BodyMeasurements::ArmCm).double())
                    .col(ColumnDef::new(BodyMeasurements::ThighCm).double())
                    .col(ColumnDef::new(BodyMeasurements::Notes).text())
                    .col(&mut timestamptz(BodyMeasurements::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(BodyMeasurements::Table, BodyMeasurements::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Physical assessments
        manager
            .create_table(
                Table::create()
                    .table(PhysicalAssessments::Table)
                    .col(&mut uuid_pk())
                    .col(
                        ColumnDef::new(PhysicalAssessments::TenantId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhysicalAssessments::StudentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PhysicalAssessments::AssessedOn)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PhysicalAssessments::RestingHeartRate).integer())
                    .col(ColumnDef::new(PhysicalAssessments::BloodPressure).string())
                    .col(ColumnDef::new(PhysicalAssessments::Vo2Max).double())
                    .col(ColumnDef::new(PhysicalAssessments::FlexibilityScore).integer())
                    .col(ColumnDef::new(PhysicalAssessments::PostureNotes).text())
                    .col(ColumnDef::new(PhysicalAssessments::Protocol).string())
                    .col(&mut timestamptz(PhysicalAssessments::CreatedAt))
                    .col(&mut timestamptz(PhysicalAssessments::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(PhysicalAssessments::Table, PhysicalAssessments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Notifications
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(Notifications::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Notifications::Kind)
                            .custom("fitcoach_platform.notification_kind")
                            .not_null()
                            .default("system"),
                    )
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Body).text().not_null())
                    .col(ColumnDef::new(Notifications::ReadAt).timestamp_with_time_zone())
                    .col(&mut timestamptz(Notifications::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Audit logs
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .col(&mut uuid_pk())
                    .col(ColumnDef::new(AuditLogs::TenantId).uuid())
                    .col(ColumnDef::new(AuditLogs::UserId).uuid())
                    .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(AuditLogs::EntityType).string().not_null())
                    .col(ColumnDef::new(AuditLogs::EntityId).uuid())
                    .col(
                        ColumnDef::new(AuditLogs::Detail)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(&mut timestamptz(AuditLogs::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .from(AuditLogs::Table, AuditLogs::TenantId)
                            .to(Tenants::Table, Tenants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            "audit_logs",
            "notifications",
            "physical_assessments",
            "body_measurements",
            "messages",
            "schedule_events",
            "workout_logs",
            "exercises",
            "workouts",
            "activation_tokens",
            "students",
            "users",
            "tenants",
        ] {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "DROP TABLE IF EXISTS fitcoach_platform.{table} CASCADE;"
                ))
                .await?;
        }

        for enum_name in [
            "notification_kind",
            "schedule_event_status",
            "student_status",
            "tenant_status",
            "role",
        ] {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "DROP TYPE IF EXISTS fitcoach_platform.{enum_name};"
                ))
                .await?;
        }

        Ok(())
    }
}
