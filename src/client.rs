use crate::acs_types::{
    CallConnectionProperties, CallInvite, CommunicationErrorResponse, CreateCallRequest,
};
use crate::error::AppError;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use sha2::{Digest, Sha256};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const API_VERSION_QUERY: &str = "api-version=2023-10-15";

/// RFC 1123 date as the provider's signature scheme expects it.
const HTTP_DATE_FORMAT: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// ACS credential: `endpoint=<url>;accesskey=<base64>`.  Key names are
/// matched case-insensitively.
#[derive(Clone, Debug)]
pub struct ConnectionString {
    pub endpoint: String,
    pub access_key: String,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let mut endpoint = None;
        let mut access_key = None;
        for part in raw.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let Some((key, value)) = part.split_once('=') else {
                return Err(AppError::ConnectionString(
                    "expected key=value pairs separated by ';'",
                ));
            };
            match key.to_ascii_lowercase().as_str() {
                "endpoint" => endpoint = Some(value.to_string()),
                "accesskey" => access_key = Some(value.to_string()),
                _ => {}
            }
        }
        let endpoint = endpoint.ok_or(AppError::ConnectionString("no endpoint part"))?;
        let access_key = access_key.ok_or(AppError::ConnectionString("no accesskey part"))?;
        Ok(Self {
            endpoint,
            access_key,
        })
    }
}

/// Minimal Call Automation client: one authenticated `createCall` round
/// trip, no retry, no idempotency key.
pub struct CallAutomationClient {
    endpoint: Url,
    access_key: String,
    http: reqwest::Client,
}

impl CallAutomationClient {
    pub fn from_connection_string(raw: &str) -> Result<Self, AppError> {
        let conn = ConnectionString::parse(raw)?;
        let endpoint = Url::parse(&conn.endpoint)
            .map_err(|_| AppError::ConnectionString("endpoint is not a valid url"))?;
        Ok(Self {
            endpoint,
            access_key: conn.access_key,
            http: reqwest::Client::new(),
        })
    }

    /// Submit one call-creation request and return the connection
    /// properties the provider reports.
    pub async fn create_call(
        &self,
        invite: &CallInvite,
        callback_uri: &str,
    ) -> Result<CallConnectionProperties, AppError> {
        let mut url = self
            .endpoint
            .join("/calling/callConnections")
            .map_err(|_| AppError::ConnectionString("endpoint is not a valid base url"))?;
        url.set_query(Some(API_VERSION_QUERY));

        // The signed content hash must cover the exact bytes sent, so the
        // body is serialized once and reused.
        let body = serde_json::to_string(&CreateCallRequest::from_invite(invite, callback_uri))?;
        let date = http_date(OffsetDateTime::now_utc())?;
        let hash = content_hash(&body);
        let to_sign = string_to_sign("POST", &url, &date, &hash);
        let signature = sign(&self.access_key, &to_sign)?;

        debug!(url = %url, "submitting call-creation request");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header("x-ms-date", &date)
            .header("x-ms-content-sha256", &hash)
            .header(AUTHORIZATION, authorization_header(&signature))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let text = response.text().await?;
            Err(call_error(status, &text))
        }
    }
}

fn http_date(now: OffsetDateTime) -> Result<String, AppError> {
    now.format(&HTTP_DATE_FORMAT)
        .map_err(|e| AppError::Signing(e.to_string()))
}

fn content_hash(body: &str) -> String {
    STANDARD.encode(Sha256::digest(body.as_bytes()))
}

fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

fn string_to_sign(method: &str, url: &Url, date: &str, content_hash: &str) -> String {
    let path_and_query = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };
    format!(
        "{method}\n{path_and_query}\n{date};{};{content_hash}",
        authority(url)
    )
}

fn sign(access_key: &str, string_to_sign: &str) -> Result<String, AppError> {
    let key = STANDARD
        .decode(access_key)
        .map_err(|_| AppError::ConnectionString("access key is not valid base64"))?;
    let mut mac = HmacSha256::new_from_slice(&key).map_err(|e| AppError::Signing(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn authorization_header(signature: &str) -> String {
    format!(
        "HMAC-SHA256 SignedHeaders=x-ms-date;host;x-ms-content-sha256&Signature={signature}"
    )
}

fn call_error(status: StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<CommunicationErrorResponse>(body) {
        Ok(decoded) => AppError::Call {
            message: decoded
                .error
                .message
                .unwrap_or_else(|| status.to_string()),
            status_code: Some(status.as_u16()),
            error_code: decoded.error.code,
        },
        Err(_) => AppError::Call {
            message: if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            },
            status_code: Some(status.as_u16()),
            error_code: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn connection_string_parses_both_parts() {
        let conn =
            ConnectionString::parse("endpoint=https://res.communication.azure.com/;accesskey=c2VjcmV0")
                .unwrap();
        assert_eq!(conn.endpoint, "https://res.communication.azure.com/");
        assert_eq!(conn.access_key, "c2VjcmV0");
    }

    #[test]
    fn connection_string_keys_are_case_insensitive() {
        let conn = ConnectionString::parse("Endpoint=https://x.example;AccessKey=a2V5PT0=").unwrap();
        assert_eq!(conn.endpoint, "https://x.example");
        // Base64 padding after the first '=' belongs to the value.
        assert_eq!(conn.access_key, "a2V5PT0=");
    }

    #[test]
    fn connection_string_missing_parts_are_rejected() {
        assert!(ConnectionString::parse("endpoint=https://x.example").is_err());
        assert!(ConnectionString::parse("accesskey=c2VjcmV0").is_err());
        assert!(ConnectionString::parse("not a connection string").is_err());
    }

    #[test]
    fn http_date_is_rfc1123() {
        let date = http_date(datetime!(2024-01-02 03:04:05 UTC)).unwrap();
        assert_eq!(date, "Tue, 02 Jan 2024 03:04:05 GMT");
    }

    #[test]
    fn content_hash_of_empty_body_matches_known_digest() {
        assert_eq!(
            content_hash(""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn string_to_sign_covers_verb_path_and_signed_headers() {
        let mut url = Url::parse("https://res.communication.azure.com/calling/callConnections")
            .unwrap();
        url.set_query(Some(API_VERSION_QUERY));
        let to_sign = string_to_sign("POST", &url, "Tue, 02 Jan 2024 03:04:05 GMT", "hash==");
        assert_eq!(
            to_sign,
            "POST\n/calling/callConnections?api-version=2023-10-15\n\
             Tue, 02 Jan 2024 03:04:05 GMT;res.communication.azure.com;hash=="
        );
    }

    #[test]
    fn authority_keeps_nonstandard_ports() {
        let url = Url::parse("https://x.example:8443/calling").unwrap();
        assert_eq!(authority(&url), "x.example:8443");
        let url = Url::parse("https://x.example/calling").unwrap();
        assert_eq!(authority(&url), "x.example");
    }

    #[test]
    fn signature_is_base64_of_a_sha256_mac() {
        let signature = sign("c2VjcmV0", "POST\n/\ndate;host;hash").unwrap();
        assert_eq!(STANDARD.decode(&signature).unwrap().len(), 32);
    }

    #[test]
    fn signing_rejects_a_non_base64_key() {
        assert!(sign("not base64!!!", "whatever").is_err());
    }

    #[test]
    fn authorization_header_names_the_signed_headers() {
        let header = authorization_header("sig==");
        assert_eq!(
            header,
            "HMAC-SHA256 SignedHeaders=x-ms-date;host;x-ms-content-sha256&Signature=sig=="
        );
    }

    #[test]
    fn provider_error_body_is_decoded() {
        let err = call_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":"InvalidCallbackUri","message":"Callback URI is invalid."}}"#,
        );
        match err {
            AppError::Call {
                message,
                status_code,
                error_code,
            } => {
                assert_eq!(message, "Callback URI is invalid.");
                assert_eq!(status_code, Some(400));
                assert_eq!(error_code.as_deref(), Some("InvalidCallbackUri"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn opaque_error_bodies_are_passed_through() {
        let err = call_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        match err {
            AppError::Call {
                message,
                status_code,
                error_code,
            } => {
                assert_eq!(message, "upstream exploded");
                assert_eq!(status_code, Some(502));
                assert!(error_code.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
