use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::{
    body_measurements::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, measurement_model: Model) -> Result<Model, Error> {
    debug!("New BodyMeasurement Model to be inserted: {measurement_model:?}");

    let measurement_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(measurement_model.tenant_id),
        student_id: Set(measurement_model.student_id),
        measured_on: Set(measurement_model.measured_on),
        weight_kg: Set(measurement_model.weight_kg),
        body_fat_percent: Set(measurement_model.body_fat_percent),
        chest_cm: Set(measurement_model.chest_cm),
        waist_cm: Set(measurement_model.waist_cm),
        hip_cm: Set(measurement_model.hip_cm),
        arm_cm: Set(measurement_model.arm_cm),
        thigh_cm: Set(measurement_model.thigh_cm),
        notes: Set(measurement_model.notes),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    Ok(measurement_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn find_by_student(
    db: &impl ConnectionTrait,
    student_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::StudentId.eq(student_id))
        .order_by_desc(Column::MeasuredOn)
        .all(db)
        .await?)
}

pub async fn update(db: &impl ConnectionTrait, id: Id, model: Model) -> Result<Model, Error> {
    let measurement = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(measurement.id),
        tenant_id: Unchanged(measurement.tenant_id),
        student_id: Unchanged(measurement.student_id),
        measured_on: Set(model.measured_on),
        weight_kg: Set(model.weight_kg),
        body_fat_percent: Set(model.body_fat_percent),
        chest_cm: Set(model.chest_cm),
        waist_cm: Set(model.waist_cm),
        hip_cm: Set(model.hip_cm),
        arm_cm: Set(model.arm_cm),
        thigh_cm: Set(model.thigh_cm),
        notes: Set(model.notes),
        created_at: Unchanged(measurement.created_at),
    };
    Ok(active_model.update(db).await?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let measurement_model = find_by_id(db, id).await?;
    measurement_model.delete(db).await?;
    Ok(())
}
