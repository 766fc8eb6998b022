use crate::extractors::RejectionType;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use semver::Version;
use service::config::ApiVersion;

/// Extracts and validates the `x-version` request header against the list
/// of API versions the server currently exposes.
pub(crate) struct CompareApiVersion(pub Version);

#[async_trait]
impl<S> FromRequestParts<S> for CompareApiVersion
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(ApiVersion::field_name())
            .and_then(|value| value.to_str().ok())
            .ok_or((
                StatusCode::BAD_REQUEST,
                format!("Missing `{}` header", ApiVersion::field_name()),
            ))?;

        let version = Version::parse(header_value).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid `{}` header value", ApiVersion::field_name()),
            )
        })?;

        if !ApiVersion::versions()
            .iter()
            .any(|supported| *supported == header_value)
        {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Unsupported API version `{header_value}`"),
            ));
        }

        Ok(CompareApiVersion(version))
    }
}
