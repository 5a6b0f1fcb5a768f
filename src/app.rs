use crate::model::ApiError;
use crate::services::ApiClient;
use crate::state::{
    AppMode, AuthFocus, FormController, LoginController, LoginForm, SignupController, SignupForm,
};
use tokio::sync::mpsc;

/// Events driving the main loop.
pub enum AppEvent {
    Terminal(crossterm::event::Event),
    /// Outcome of a dispatched submission. Tagged with the generation the
    /// form had at dispatch time so outcomes that settle after a screen
    /// switch are dropped instead of mutating a torn-down form.
    Submission {
        form: AppMode,
        generation: u64,
        outcome: Result<(), ApiError>,
    },
    Navigate(AppMode),
    Tick,
}

pub struct App {
    pub mode: AppMode,
    pub focus: AuthFocus,
    pub login: LoginController,
    pub signup: SignupController,
    pub tick_count: u64,
    pub should_quit: bool,
    generation: u64,
    events: mpsc::UnboundedSender<AppEvent>,
    api: ApiClient,
}

impl App {
    pub fn new(api: ApiClient, events: mpsc::UnboundedSender<AppEvent>) -> App {
        App {
            mode: AppMode::Login,
            focus: AuthFocus::LoginUsername,
            login: Self::login_controller(&api),
            signup: Self::signup_controller(&api, events.clone()),
            tick_count: 0,
            should_quit: false,
            generation: 0,
            events,
            api,
        }
    }

    fn login_controller(api: &ApiClient) -> LoginController {
        // Login success needs no navigation; the caller re-renders with a
        // clean form.
        FormController::<LoginForm>::new(api.submit_action(), || {})
    }

    fn signup_controller(
        api: &ApiClient,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> SignupController {
        // The navigation collaborator: a successful signup moves the user
        // to the login screen.
        FormController::<SignupForm>::new(api.submit_action(), move || {
            let _ = events.send(AppEvent::Navigate(AppMode::Login));
        })
    }

    /// Switch screens. Both forms are remounted fresh; nothing persists
    /// across instances, and any still-running submission for the old
    /// screen becomes stale.
    pub fn go_to(&mut self, mode: AppMode) {
        self.generation += 1;
        self.login = Self::login_controller(&self.api);
        self.signup = Self::signup_controller(&self.api, self.events.clone());
        self.mode = mode;
        self.focus = match mode {
            AppMode::Login => AuthFocus::LoginUsername,
            AppMode::Signup => AuthFocus::SignupDisplayName,
        };
    }

    /// Submit the active form. A no-op when the form is ineligible or a
    /// submission is already in flight; otherwise the controller's future
    /// is driven on the runtime and its outcome posted back to the loop.
    pub fn submit_active(&mut self) {
        let future = match self.mode {
            AppMode::Login => self.login.submit(),
            AppMode::Signup => self.signup.submit(),
        };
        let Some(future) = future else { return };

        let form = self.mode;
        let generation = self.generation;
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = future.await;
            let _ = events.send(AppEvent::Submission {
                form,
                generation,
                outcome,
            });
        });
    }

    pub fn handle_submission(
        &mut self,
        form: AppMode,
        generation: u64,
        outcome: Result<(), ApiError>,
    ) {
        if generation != self.generation {
            tracing::debug!(?form, "dropping stale submission outcome");
            return;
        }
        match form {
            AppMode::Login => self.login.settle(outcome),
            AppMode::Signup => self.signup.settle(outcome),
        }
    }

    pub fn on_tick(&mut self) {
        self.tick_count += 1;
    }
}
