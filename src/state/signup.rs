use super::form::{FormController, FormField, FormModel};
use crate::model::ApiRequest;

/// Shown under the repeat-password field whenever the two password values
/// diverge, regardless of which of the pair was edited last.
pub const PASSWORD_MISMATCH: &str = "Does not match to password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    DisplayName,
    Username,
    Password,
    RepeatPassword,
}

/// Account-creation form. Display name and username never self-validate
/// client-side; the password pair carries the only local rule.
#[derive(Debug)]
pub struct SignupForm {
    display_name: FormField,
    username: FormField,
    password: FormField,
    repeat_password: FormField,
    passwords_match: bool,
}

impl Default for SignupForm {
    fn default() -> Self {
        // Both password fields start empty, so they agree and the
        // mismatch rule stays silent until the user diverges them.
        Self {
            display_name: FormField::default(),
            username: FormField::default(),
            password: FormField::default(),
            repeat_password: FormField::default(),
            passwords_match: true,
        }
    }
}

impl SignupForm {
    pub fn passwords_match(&self) -> bool {
        self.passwords_match
    }

    /// Recompute the password agreement and pin the mismatch message to
    /// the repeat field, the sole display location for this error.
    fn refresh_password_agreement(&mut self) {
        let matched = self.password.value() == self.repeat_password.value();
        self.passwords_match = matched;
        self.repeat_password
            .set_error((!matched).then(|| PASSWORD_MISMATCH.to_string()));
    }
}

impl FormModel for SignupForm {
    type Field = SignupField;

    fn field(&self, field: SignupField) -> &FormField {
        match field {
            SignupField::DisplayName => &self.display_name,
            SignupField::Username => &self.username,
            SignupField::Password => &self.password,
            SignupField::RepeatPassword => &self.repeat_password,
        }
    }

    fn field_mut(&mut self, field: SignupField) -> &mut FormField {
        match field {
            SignupField::DisplayName => &mut self.display_name,
            SignupField::Username => &mut self.username,
            SignupField::Password => &mut self.password,
            SignupField::RepeatPassword => &mut self.repeat_password,
        }
    }

    fn apply_change(&mut self, field: SignupField, value: String) {
        // set_value clears the edited field's own error, including any
        // server verdict on the password field.
        self.field_mut(field).set_value(value);
        if matches!(field, SignupField::Password | SignupField::RepeatPassword) {
            self.refresh_password_agreement();
        }
    }

    /// Empty fields are deliberately allowed through; server-side
    /// validation covers them. Only the password agreement blocks a
    /// signup submit.
    fn submit_eligible(&self) -> bool {
        self.passwords_match
    }

    fn request(&self) -> ApiRequest {
        ApiRequest::SignUp {
            display_name: self.display_name.value().to_string(),
            username: self.username.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    fn field_for_name(name: &str) -> Option<SignupField> {
        match name {
            "displayName" => Some(SignupField::DisplayName),
            "username" => Some(SignupField::Username),
            "password" => Some(SignupField::Password),
            "repeatPassword" => Some(SignupField::RepeatPassword),
            _ => None,
        }
    }
}

pub type SignupController = FormController<SignupForm>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApiError;
    use crate::state::form::testing::ScriptedAction;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn mismatch_attaches_error_to_repeat_field_only() {
        let mut form = SignupForm::default();
        form.apply_change(SignupField::Password, "my-password".into());
        form.apply_change(SignupField::RepeatPassword, "new-pass".into());

        assert!(!form.passwords_match());
        assert_eq!(form.field(SignupField::RepeatPassword).error(), Some(PASSWORD_MISMATCH));
        assert_eq!(form.field(SignupField::Password).error(), None);
    }

    #[test]
    fn editing_password_reevaluates_against_stored_repeat() {
        let mut form = SignupForm::default();
        form.apply_change(SignupField::RepeatPassword, "secret".into());
        assert!(!form.passwords_match());

        form.apply_change(SignupField::Password, "secret".into());
        assert!(form.passwords_match());
        assert_eq!(form.field(SignupField::RepeatPassword).error(), None);
    }

    #[test]
    fn password_edit_clears_server_verdict_on_password() {
        let mut form = SignupForm::default();
        form.field_mut(SignupField::Password)
            .set_error(Some("too short".into()));
        form.apply_change(SignupField::Password, "longer-now".into());
        assert_eq!(form.field(SignupField::Password).error(), None);
        // The mismatch rule still ran for the pair.
        assert_eq!(form.field(SignupField::RepeatPassword).error(), Some(PASSWORD_MISMATCH));
    }

    #[test]
    fn fresh_form_is_silent_and_eligible() {
        let form = SignupForm::default();
        assert!(form.passwords_match());
        assert!(form.submit_eligible());
        assert_eq!(form.field(SignupField::RepeatPassword).error(), None);
    }

    #[test]
    fn submit_is_noop_while_passwords_diverge() {
        let action = ScriptedAction::ok();
        let calls = action.calls.clone();
        let mut ctrl = SignupController::new(action, || {});
        ctrl.set_field(SignupField::DisplayName, "display");
        ctrl.set_field(SignupField::Username, "user");
        ctrl.set_field(SignupField::Password, "my-password");
        ctrl.set_field(SignupField::RepeatPassword, "new-pass");

        assert!(!ctrl.model().passwords_match());
        assert!(!ctrl.can_submit());
        assert!(ctrl.submit().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!ctrl.is_submitting());
    }

    #[tokio::test]
    async fn successful_signup_strips_repeat_password_and_navigates_once() {
        let action = ScriptedAction::ok();
        let calls = action.calls.clone();
        let last_request = action.last_request.clone();
        let navigations = Arc::new(AtomicUsize::new(0));
        let nav_counter = navigations.clone();
        let mut ctrl = SignupController::new(action, move || {
            nav_counter.fetch_add(1, Ordering::SeqCst);
        });

        ctrl.set_field(SignupField::DisplayName, "my-display-name");
        ctrl.set_field(SignupField::Username, "my-username");
        ctrl.set_field(SignupField::Password, "my-password");
        ctrl.set_field(SignupField::RepeatPassword, "my-password");

        let outcome = ctrl.submit().expect("eligible").await;
        assert_eq!(
            *last_request.lock().unwrap(),
            Some(ApiRequest::SignUp {
                display_name: "my-display-name".into(),
                username: "my-username".into(),
                password: "my-password".into(),
            })
        );
        ctrl.settle(outcome);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(navigations.load(Ordering::SeqCst), 1);
        assert!(!ctrl.is_submitting());
    }

    #[tokio::test]
    async fn field_validation_failure_lands_on_the_named_field() {
        let mut errors = HashMap::new();
        errors.insert(
            "displayName".to_string(),
            "It must have minimum 4 and maximum 255 characters".to_string(),
        );
        errors.insert("username".to_string(), "Username is taken".to_string());
        let action = ScriptedAction::with(Err(ApiError {
            message: None,
            validation_errors: Some(errors),
        }));
        let mut ctrl = SignupController::new(action, || {});
        ctrl.set_field(SignupField::Password, "pw");
        ctrl.set_field(SignupField::RepeatPassword, "pw");

        let outcome = ctrl.submit().expect("eligible").await;
        ctrl.settle(outcome);

        assert_eq!(
            ctrl.error(SignupField::DisplayName),
            Some("It must have minimum 4 and maximum 255 characters")
        );
        assert_eq!(ctrl.error(SignupField::Username), Some("Username is taken"));

        // Editing an annotated field clears exactly that error and no other.
        ctrl.set_field(SignupField::DisplayName, "my-display-name");
        assert_eq!(ctrl.error(SignupField::DisplayName), None);
        assert_eq!(ctrl.error(SignupField::Username), Some("Username is taken"));
    }

    #[tokio::test]
    async fn signup_never_surfaces_a_form_level_banner() {
        let action = ScriptedAction::with(Err(ApiError {
            message: Some("Something went wrong".into()),
            validation_errors: None,
        }));
        let mut ctrl = SignupController::new(action, || {});
        let outcome = ctrl.submit().expect("eligible").await;
        ctrl.settle(outcome);
        assert_eq!(ctrl.form_error(), None);
    }

    proptest! {
        #[test]
        fn agreement_tracks_value_equality(a in ".*", b in ".*") {
            let mut form = SignupForm::default();
            form.apply_change(SignupField::Password, a.clone());
            form.apply_change(SignupField::RepeatPassword, b.clone());

            prop_assert_eq!(form.passwords_match(), a == b);
            prop_assert_eq!(
                form.field(SignupField::RepeatPassword).error().is_none(),
                a == b
            );
        }
    }
}
