pub mod form;
pub mod login;
pub mod signup;

pub use form::{FormController, FormField, FormModel, NullAction, SubmitAction, SubmitFuture};
pub use login::{LoginController, LoginField, LoginForm};
pub use signup::{SignupController, SignupField, SignupForm, PASSWORD_MISMATCH};

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Login,
    Signup,
}

/// Keyboard focus within the two auth screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    LoginUsername,
    LoginPassword,
    SignupDisplayName,
    SignupUsername,
    SignupPassword,
    SignupRepeatPassword,
    Submit,
    Switch,
}
