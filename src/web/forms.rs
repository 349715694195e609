//! Form and query-string payloads accepted by the web pages.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::application::services::Registration;
use crate::application::services::auth_service::USERNAME_RE;

/// `?q=` search parameter of list pages.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Sign-up form. An empty image field means "use the default picture".
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<SignupForm> for Registration {
    fn from(form: SignupForm) -> Self {
        Registration {
            username: form.username.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
            image_url: form.image_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Profile edit form; `password` is the current password.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 30), regex(path = *USERNAME_RE))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Flattens validation errors into one sentence for a flash message.
pub fn describe(errors: &validator::ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
    fields.sort_unstable();
    format!("Please check: {}", fields.join(", "))
}
