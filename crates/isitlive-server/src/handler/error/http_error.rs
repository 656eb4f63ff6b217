//! HTTP error type built from an [`ErrorKind`] plus optional detail.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::extract::Json;
use crate::handler::response::ErrorResponse;

/// Error returned by handlers and extractors.
///
/// The [`ErrorKind`] picks the status code and the base [`ErrorResponse`];
/// message, resource and context refine it. Context is logged but never
/// serialized.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    context: Option<Cow<'a, str>>,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates an error of the given kind with no detail.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Attaches internal context for logs.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Attaches a client-facing message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Names the resource the error concerns.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Converts borrowed detail into owned detail.
    pub fn into_static(self) -> Error<'static> {
        Error {
            kind: self.kind,
            context: self.context.map(owned),
            message: self.message.map(owned),
            resource: self.resource.map(owned),
        }
    }

    /// Builds the response body for this error.
    pub fn to_response(&self) -> ErrorResponse<'static> {
        let mut response = self.kind.response();

        if let Some(message) = &self.message {
            response = response.with_message(message.to_string());
        }

        if let Some(resource) = &self.resource {
            response = response.with_resource(resource.to_string());
        }

        if let Some(context) = &self.context {
            response = response.with_context(context.to_string());
        }

        if let Some(suggestion) = self.kind.suggestion() {
            response = response.with_suggestion(suggestion);
        }

        response
    }
}

fn owned(detail: Cow<'_, str>) -> Cow<'static, str> {
    Cow::Owned(detail.into_owned())
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", response.name, response.status.as_u16(), message)?;

        if let Some(ref context) = self.context {
            write!(f, " - {context}")?;
        }

        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {resource}]")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl aide::OperationOutput for Error<'_> {
    type Inner = ErrorResponse<'static>;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ErrorResponse<'static>>::operation_response(ctx, operation)
    }
}

/// Result type for handlers.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Categories of HTTP errors the API can return.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    MissingPathParam,
    BadRequest,
    NotFound,
    PayloadTooLarge,

    // 5xx Server Errors
    #[default]
    InternalServerError,
    ServiceUnavailable,
    GatewayTimeout,
}

impl ErrorKind {
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the base response body for this kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::MissingPathParam => ErrorResponse::MISSING_PATH_PARAM,
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::PayloadTooLarge => ErrorResponse::PAYLOAD_TOO_LARGE,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout => ErrorResponse::GATEWAY_TIMEOUT,
        }
    }

    /// Returns a hint for the client, for kinds where retrying may help.
    fn suggestion(self) -> Option<&'static str> {
        match self {
            Self::ServiceUnavailable | Self::GatewayTimeout => Some("Retry the request later."),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        Error::new(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("Monitor not found")
            .with_resource("monitor")
            .with_context("id: 42");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Monitor not found"));
        assert_eq!(error.resource(), Some("monitor"));
        assert_eq!(error.context(), Some("id: 42"));
    }

    #[test]
    fn response_body_merges_detail() {
        let body = ErrorKind::NotFound
            .with_message("Monitor 42 does not exist")
            .with_resource("monitor")
            .to_response();

        assert_eq!(body.name, "not_found");
        assert_eq!(body.message, "Resource not found. Monitor 42 does not exist");
        assert_eq!(body.resource.as_deref(), Some("monitor"));
        assert_eq!(body.suggestion, None);
    }

    #[test]
    fn unavailable_suggests_retry() {
        let body = ErrorKind::ServiceUnavailable.into_error().to_response();
        assert_eq!(body.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.suggestion.is_some());
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("Monitor not found")
            .with_resource("monitor")
            .with_context("id: 42");

        let display = error.to_string();
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("Monitor not found"));
        assert!(display.contains("id: 42"));
        assert!(display.contains("monitor"));
    }

    #[test]
    fn error_into_static() {
        let message = String::from("borrowed message");
        let error = ErrorKind::BadRequest.with_message(message.as_str());

        let static_error = error.into_static();
        assert_eq!(static_error.message(), Some("borrowed message"));
    }

    #[test]
    fn all_error_kinds_have_responses() {
        let kinds = [
            ErrorKind::MissingPathParam,
            ErrorKind::BadRequest,
            ErrorKind::NotFound,
            ErrorKind::PayloadTooLarge,
            ErrorKind::InternalServerError,
            ErrorKind::ServiceUnavailable,
            ErrorKind::GatewayTimeout,
        ];

        for kind in kinds {
            let response = kind.response();
            assert!(!response.name.is_empty());
            assert!(response.status.as_u16() >= 400);
            assert_eq!(kind.into_response().status(), response.status);
        }
    }
}
