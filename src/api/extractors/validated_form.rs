//! Form extractor that validates after deserializing.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, Form, FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Drop-in replacement for [`Form`] that also runs the payload's
/// `validator` rules, turning failures into 400 responses.
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use wicket::api::extractors::ValidatedForm;
///
/// #[derive(Deserialize, Validate)]
/// struct LoginForm {
///     #[validate(length(min = 1))]
///     username: String,
///     #[validate(length(min = 1))]
///     password: String,
/// }
///
/// async fn login(ValidatedForm(form): ValidatedForm<LoginForm>) {
///     // form passed every rule
/// }
/// ```
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedForm(value))
    }
}

/// Flatten validation errors into one comma-separated message.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            match &err.message {
                Some(msg) => messages.push(msg.to_string()),
                None => messages.push(format!("{} is invalid", field)),
            }
        }
    }
    messages.join(", ")
}
