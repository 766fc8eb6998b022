use crate::error::Error;
use crate::{physical_assessments::Model, students, Id};
use entity_api::physical_assessment;
use sea_orm::DatabaseConnection;

pub use entity_api::physical_assessment::{find_by_id, find_by_student};

/// Records an assessment for a student. Tenant and student scoping comes
/// from the student record, never from client input.
pub async fn create(
    db: &DatabaseConnection,
    student: &students::Model,
    mut assessment_model: Model,
) -> Result<Model, Error> {
    validate(&assessment_model)?;

    assessment_model.tenant_id = student.tenant_id;
    assessment_model.student_id = student.id;
    Ok(physical_assessment::create(db, assessment_model).await?)
}

pub async fn update(db: &DatabaseConnection, id: Id, model: Model) -> Result<Model, Error> {
    validate(&model)?;
    Ok(physical_assessment::update(db, id, model).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    Ok(physical_assessment::delete_by_id(db, id).await?)
}

fn validate(model: &Model) -> Result<(), Error> {
    if let Some(rhr) = model.resting_heart_rate {
        if !(20..=250).contains(&rhr) {
            return Err(Error::invalid("resting heart rate out of range"));
        }
    }
    if let Some(score) = model.flexibility_score {
        if !(0..=100).contains(&score) {
            return Err(Error::invalid("flexibility score out of range"));
        }
    }
    Ok(())
}
