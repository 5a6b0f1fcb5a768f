use super::form::{FormController, FormField, FormModel};
use crate::model::ApiRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Login form. No client-side rules beyond the non-empty eligibility
/// check; failures come back from the API, either per-field or as the
/// form-level banner.
#[derive(Debug, Default)]
pub struct LoginForm {
    username: FormField,
    password: FormField,
}

impl FormModel for LoginForm {
    type Field = LoginField;

    // A rejected login with a message ("Login failed") shows up as a
    // banner rather than on a specific field.
    const SURFACES_FORM_ERROR: bool = true;

    fn field(&self, field: LoginField) -> &FormField {
        match field {
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
        }
    }

    fn field_mut(&mut self, field: LoginField) -> &mut FormField {
        match field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn submit_eligible(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::Login {
            username: self.username.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    fn field_for_name(name: &str) -> Option<LoginField> {
        match name {
            "username" => Some(LoginField::Username),
            "password" => Some(LoginField::Password),
            _ => None,
        }
    }
}

pub type LoginController = FormController<LoginForm>;
