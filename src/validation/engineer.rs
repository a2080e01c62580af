use serde::Deserialize;

use super::Violations;
use crate::entities::engineer::{self, EngineerRole};
use crate::error::AppError;

/// Body of `POST /api/engineers` and `PUT /api/engineers/{id}`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineerPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    /// One of the engineer roles listed by `GET /api/options`.
    pub role: Option<String>,
    pub specialization: Option<String>,
    pub contact_number: Option<String>,
    /// Years, a non-negative whole number.
    pub experience: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineerDraft {
    pub name: String,
    pub email: String,
    pub role: EngineerRole,
    pub specialization: String,
    pub contact_number: String,
    pub experience: i32,
}

impl From<&engineer::Model> for EngineerPayload {
    fn from(model: &engineer::Model) -> Self {
        Self {
            name: Some(model.name.clone()),
            email: Some(model.email.clone()),
            role: Some(model.role.label().to_string()),
            specialization: Some(model.specialization.clone()),
            contact_number: Some(model.contact_number.clone()),
            experience: Some(f64::from(model.experience)),
        }
    }
}

impl EngineerPayload {
    /// Fields absent from `self` fall back to `base`.
    pub fn or(self, base: EngineerPayload) -> EngineerPayload {
        EngineerPayload {
            name: self.name.or(base.name),
            email: self.email.or(base.email),
            role: self.role.or(base.role),
            specialization: self.specialization.or(base.specialization),
            contact_number: self.contact_number.or(base.contact_number),
            experience: self.experience.or(base.experience),
        }
    }

    pub fn validate(self) -> Result<EngineerDraft, AppError> {
        let mut v = Violations::new("Engineer");

        let name = v.required_text("name", self.name);
        let email = v.required_text("email", self.email);
        let role = v.required("role", self.role);
        let role = v.one_of::<EngineerRole>("role", role);
        let specialization = v.required_text("specialization", self.specialization);
        let contact_number = v.required_text("contactNumber", self.contact_number);
        let experience = v
            .required("experience", self.experience)
            .and_then(|raw| v.whole_number("experience", raw))
            .and_then(|years| match i32::try_from(years) {
                Ok(years) if years >= 0 => Some(years),
                _ => {
                    v.add("experience", format!("{} is not a valid number of years", years));
                    None
                }
            });

        v.finish_with(|| {
            Some(EngineerDraft {
                name: name?,
                email: email?,
                role: role?,
                specialization: specialization?,
                contact_number: contact_number?,
                experience: experience?,
            })
        })
    }
}
