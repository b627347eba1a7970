//! Conversions from external infrastructure errors into domain errors.

use nimbus_domain::NimbusError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub NimbusError);

impl From<InfraError> for NimbusError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<NimbusError> for InfraError {
    fn from(value: NimbusError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoNimbusError {
    fn into_nimbus(self) -> NimbusError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → NimbusError */
/* -------------------------------------------------------------------------- */

impl IntoNimbusError for HttpError {
    fn into_nimbus(self) -> NimbusError {
        if self.is_timeout() {
            return NimbusError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return NimbusError::Network(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return NimbusError::UnexpectedStatus { status: status.as_u16(), body: String::new() };
        }

        if self.is_decode() {
            return NimbusError::Parse(format!("failed to decode HTTP response: {self}"));
        }

        if self.is_builder() {
            return NimbusError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        NimbusError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_nimbus())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → NimbusError */
/* -------------------------------------------------------------------------- */

impl IntoNimbusError for JsonError {
    fn into_nimbus(self) -> NimbusError {
        NimbusError::Parse(format!("invalid JSON: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_nimbus())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → NimbusError */
/* -------------------------------------------------------------------------- */

impl IntoNimbusError for UrlError {
    fn into_nimbus(self) -> NimbusError {
        NimbusError::InvalidInput(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_nimbus())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn json_error_maps_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mapped: NimbusError = InfraError::from(err).into();
        assert!(matches!(mapped, NimbusError::Parse(msg) if msg.starts_with("invalid JSON")));
    }

    #[test]
    fn url_error_maps_to_invalid_input() {
        let err = url::Url::parse("not a url").unwrap_err();
        let mapped: NimbusError = InfraError::from(err).into();
        assert!(matches!(mapped, NimbusError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn http_status_maps_to_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: NimbusError = InfraError::from(error).into();
        assert_eq!(mapped, NimbusError::UnexpectedStatus { status: 401, body: String::new() });
    }
}
