use crate::auth::dto::{AuthResponse, LoginRequest};

/// The only message a failed sign-in ever shows.
pub const LOGIN_ERROR: &str = "Invalid email or password";
pub const SIGN_UP_UNAVAILABLE: &str = "Account creation is not available yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    Validating,
    RedirectSuccess,
    ErrorShown(String),
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    mode: AuthMode,
    show_password: bool,
    state: LoginState,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            remember_me: false,
            mode: AuthMode::SignIn,
            show_password: false,
            state: LoginState::Idle,
        }
    }
}

impl LoginForm {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn select_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.state = LoginState::Idle;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Password as it should be displayed.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    /// Title and subtitle for the current mode.
    pub fn heading(&self) -> (&'static str, &'static str) {
        match self.mode {
            AuthMode::SignIn => ("Welcome Back Creative!", "We Are Happy To See You Again"),
            AuthMode::SignUp => ("Join Masomohub Today", "Start your learning journey with us"),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            AuthMode::SignIn => "Login",
            AuthMode::SignUp => "Create Account",
        }
    }

    /// Starts validation and returns the request to send, if any.
    ///
    /// Blank fields fail immediately without contacting the server.
    pub fn submit(&mut self) -> Option<LoginRequest> {
        if self.state == LoginState::Validating {
            return None;
        }
        if self.mode == AuthMode::SignUp {
            self.state = LoginState::ErrorShown(SIGN_UP_UNAVAILABLE.into());
            return None;
        }
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.state = LoginState::ErrorShown(LOGIN_ERROR.into());
            return None;
        }
        self.state = LoginState::Validating;
        Some(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn resolve<E>(&mut self, outcome: Result<AuthResponse, E>) -> Option<AuthResponse> {
        if self.state != LoginState::Validating {
            return None;
        }
        match outcome {
            Ok(auth) => {
                self.state = LoginState::RedirectSuccess;
                self.password.clear();
                Some(auth)
            }
            Err(_) => {
                self.state = LoginState::ErrorShown(LOGIN_ERROR.into());
                None
            }
        }
    }
}
