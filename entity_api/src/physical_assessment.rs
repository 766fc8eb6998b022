use super::error::{EntityApiErrorKind, Error};
use chrono::Utc;
use entity::{
    physical_assessments::{ActiveModel, Column, Entity, Model},
    Id,
};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ActiveValue::Unchanged, ConnectionTrait, QueryOrder,
};

use log::*;

pub async fn create(db: &impl ConnectionTrait, assessment_model: Model) -> Result<Model, Error> {
    debug!("New PhysicalAssessment Model to be inserted: {assessment_model:?}");

    let now = Utc::now();
    let assessment_active_model: ActiveModel = ActiveModel {
        tenant_id: Set(assessment_model.tenant_id),
        student_id: Set(assessment_model.student_id),
        assessed_on: Set(assessment_model.assessed_on),
        resting_heart_rate: Set(assessment_model.resting_heart_rate),
        blood_pressure: Set(assessment_model.blood_pressure),
        vo2_max: Set(assessment_model.vo2_max),
        flexibility_score: Set(assessment_model.flexibility_score),
        posture_notes: Set(assessment_model.posture_notes),
        protocol: Set(assessment_model.protocol),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(assessment_active_model.insert(db).await?)
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
        .order_by_desc(Column::AssessedOn)
        .all(db)
        .await?)
}

pub async fn update(db: &impl ConnectionTrait, id: Id, model: Model) -> Result<Model, Error> {
    let assessment = find_by_id(db, id).await?;

    let active_model: ActiveModel = ActiveModel {
        id: Unchanged(assessment.id),
        tenant_id: Unchanged(assessment.tenant_id),
        student_id: Unchanged(assessment.student_id),
        assessed_on: Set(model.assessed_on),
        resting_heart_rate: Set(model.resting_heart_rate),
        blood_pressure: Set(model.blood_pressure),
        vo2_max: Set(model.vo2_max),
        flexibility_score: Set(model.flexibility_score),
        posture_notes: Set(model.posture_notes),
        protocol: Set(model.protocol),
        created_at: Unchanged(assessment.created_at),
        updated_at: Set(Utc::now().into()),
    };
    Ok(active_model.update(db).await?)
}

pub async fn delete_by_id(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let assessment_model = find_by_id(db, id).await?;
    assessment_model.delete(db).await?;
    Ok(())
}
