use crate::error::Error;
use crate::{body_measurements::Model, students, Id};
use entity_api::body_measurement;
use sea_orm::DatabaseConnection;

pub use entity_api::body_measurement::{find_by_id, find_by_student};

/// Records a measurement for a student. Tenant and student scoping comes
/// from the student record, never from client input.
pub async fn create(
    db: &DatabaseConnection,
    student: &students::Model,
    mut measurement_model: Model,
) -> Result<Model, Error> {
    validate(&measurement_model)?;

    measurement_model.tenant_id = student.tenant_id;
    measurement_model.student_id = student.id;
    Ok(body_measurement::create(db, measurement_model).await?)
}

pub async fn update(db: &DatabaseConnection, id: Id, model: Model) -> Result<Model, Error> {
    validate(&model)?;
    Ok(body_measurement::update(db, id, model).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    Ok(body_measurement::delete_by_id(db, id).await?)
}

fn validate(model: &Model) -> Result<(), Error> {
    if model.weight_kg <= 0.0 || model.weight_kg > 500.0 {
        return Err(Error::invalid("weight must be between 0 and 500 kg"));
    }
    if let Some(body_fat) = model.body_fat_percent {
        if !(0.0..=100.0).contains(&body_fat) {
            return Err(Error::invalid("body fat must be a percentage"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn measurement(weight_kg: f64, body_fat_percent: Option<f64>) -> Model {
        Model {
            id: Id::new_v4(),
            tenant_id: Id::new_v4(),
            student_id: Id::new_v4(),
            measured_on: Utc::now().date_naive(),
            weight_kg,
            body_fat_percent,
            chest_cm: None,
            waist_cm: None,
            hip_cm: None,
            arm_cm: None,
            thigh_cm: None,
            notes: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn validation_bounds_weight_and_body_fat() {
        assert!(validate(&measurement(82.5, Some(18.0))).is_ok());
        assert!(validate(&measurement(0.0, None)).is_err());
        assert!(validate(&measurement(501.0, None)).is_err());
        assert!(validate(&measurement(82.5, Some(101.0))).is_err());
    }
}
