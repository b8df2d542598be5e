//! AWS Signature Version 4
//!
//! Computes the `Authorization` header (and its companions) for requests
//! against the database service. Only bodiless requests are signed, which is
//! all the log download API needs.
//!
//! See <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rdslogs_core::domain::credentials::Credentials;
use reqwest::Url;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::error::{ClientError, Result};

/// Signing algorithm identifier
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Hex SHA-256 of an empty payload
const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// RFC 3986 unreserved characters are the only ones left unescaped
pub(crate) const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

type HmacSha256 = Hmac<Sha256>;

/// Headers produced by signing a request
///
/// All of them must be sent with the request, alongside the headers that
/// were passed in for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// `X-Amz-Date` timestamp (`YYYYMMDDTHHMMSSZ`)
    pub amz_date: String,

    /// `X-Amz-Security-Token`, present for temporary credentials
    pub security_token: Option<String>,

    /// `Authorization` header value
    pub authorization: String,
}

impl SignedHeaders {
    /// Iterate over `(header name, value)` pairs to attach to the request
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            Some(("x-amz-date", self.amz_date.as_str())),
            self.security_token
                .as_deref()
                .map(|token| ("x-amz-security-token", token)),
            Some(("authorization", self.authorization.as_str())),
        ]
        .into_iter()
        .flatten()
    }
}

/// Signs requests for one service in one region
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    region: &'a str,
    service: &'a str,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer
    ///
    /// # Arguments
    /// * `credentials` - Access key material
    /// * `region` - Region the request is sent to (e.g., "us-east-1")
    /// * `service` - Signing name of the service (e.g., "rds")
    pub fn new(credentials: &'a Credentials, region: &'a str, service: &'a str) -> Self {
        Self {
            credentials,
            region,
            service,
        }
    }

    /// Sign a bodiless request
    ///
    /// # Arguments
    /// * `method` - HTTP method (e.g., "GET")
    /// * `url` - Full request URL, path already percent-encoded
    /// * `headers` - Extra headers that will be sent and must be signed
    /// * `now` - Signing time
    pub fn sign(
        &self,
        method: &str,
        url: &Url,
        headers: &BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> Result<SignedHeaders> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();

        let mut headers: BTreeMap<String, String> = headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.trim().to_string()))
            .collect();
        headers.insert("host".to_string(), host_header(url)?);
        headers.insert("x-amz-date".to_string(), amz_date.clone());
        if let Some(token) = &self.credentials.session_token {
            headers.insert("x-amz-security-token".to_string(), token.clone());
        }

        let (canonical_request, signed_headers) = canonical_request(method, url, &headers);
        let canonical_request_hash = hex::encode(Sha256::digest(canonical_request.as_bytes()));

        let credential_scope = format!(
            "{}/{}/{}/aws4_request",
            date_stamp, self.region, self.service
        );
        let string_to_sign = [
            ALGORITHM,
            amz_date.as_str(),
            credential_scope.as_str(),
            canonical_request_hash.as_str(),
        ]
        .join("\n");

        let signing_key = signing_key(
            &self.credentials.secret_access_key,
            &date_stamp,
            self.region,
            self.service,
        )?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        let authorization = format!(
            "{ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.credentials.access_key_id
        );

        Ok(SignedHeaders {
            amz_date,
            security_token: self.credentials.session_token.clone(),
            authorization,
        })
    }
}

/// Build the canonical request and the list of signed header names
///
/// `headers` must already be lowercased; the map keeps them sorted.
fn canonical_request(
    method: &str,
    url: &Url,
    headers: &BTreeMap<String, String>,
) -> (String, String) {
    let canonical_headers = headers
        .iter()
        .fold(String::new(), |acc, (k, v)| format!("{acc}{k}:{v}\n"));
    let signed_headers = headers
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = [
        method.to_string(),
        canonical_uri(url),
        canonical_query(url),
        canonical_headers,
        signed_headers.clone(),
        EMPTY_PAYLOAD_SHA256.to_string(),
    ]
    .join("\n");

    (canonical_request, signed_headers)
}

/// Canonical URI of `url`
///
/// Services other than S3 expect every path segment encoded twice: the path on
/// the wire is encoded once already, so each segment is encoded once more.
fn canonical_uri(url: &Url) -> String {
    let path = url.path();
    if path.is_empty() {
        return "/".to_string();
    }
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, URI_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical query string of `url`: pairs encoded per RFC 3986 and sorted
fn canonical_query(url: &Url) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            (
                utf8_percent_encode(&k, URI_ENCODE_SET).to_string(),
                utf8_percent_encode(&v, URI_ENCODE_SET).to_string(),
            )
        })
        .collect();
    pairs.sort();
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// `Host` header value, as the HTTP client will send it
fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidEndpoint(format!("{url} has no host")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Derive the signing key for one day, region and service
fn signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Result<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| ClientError::SigningFailed(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn example_credentials() -> Credentials {
        Credentials::new("AKIDEXAMPLE", SECRET)
    }

    #[test]
    fn test_signing_key_derivation() {
        let key = signing_key(SECRET, "20120215", "us-east-1", "iam").unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_sign_list_users_example() {
        let credentials = example_credentials();
        let signer = RequestSigner::new(&credentials, "us-east-1", "iam");
        let url = Url::parse("https://iam.amazonaws.com/?Action=ListUsers&Version=2010-05-08")
            .unwrap();
        let headers = BTreeMap::from([(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded; charset=utf-8".to_string(),
        )]);
        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();

        let signed = signer.sign("GET", &url, &headers, now).unwrap();

        assert_eq!(signed.amz_date, "20150830T123600Z");
        assert_eq!(signed.security_token, None);
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_canonical_request_list_users_example() {
        let url = Url::parse("https://iam.amazonaws.com/?Version=2010-05-08&Action=ListUsers")
            .unwrap();
        let headers = BTreeMap::from([
            (
                "content-type".to_string(),
                "application/x-www-form-urlencoded; charset=utf-8".to_string(),
            ),
            ("host".to_string(), "iam.amazonaws.com".to_string()),
            ("x-amz-date".to_string(), "20150830T123600Z".to_string()),
        ]);

        let (canonical, signed_headers) = canonical_request("GET", &url, &headers);

        assert_eq!(signed_headers, "content-type;host;x-amz-date");
        assert_eq!(
            hex::encode(Sha256::digest(canonical.as_bytes())),
            "f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59"
        );
    }

    #[test]
    fn test_session_token_is_signed_and_returned() {
        let credentials = example_credentials().with_session_token("session");
        let signer = RequestSigner::new(&credentials, "eu-west-1", "rds");
        let url = Url::parse(
            "https://rds.eu-west-1.amazonaws.com/v13/downloadCompleteLogFile/db-1/error/postgresql.log",
        )
        .unwrap();
        let now = Utc.with_ymd_and_hms(2018, 1, 15, 13, 45, 31).unwrap();

        let signed = signer.sign("GET", &url, &BTreeMap::new(), now).unwrap();

        assert_eq!(signed.security_token.as_deref(), Some("session"));
        assert!(signed.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20180115/eu-west-1/rds/aws4_request, \
             SignedHeaders=host;x-amz-date;x-amz-security-token, Signature="
        ));

        let names: Vec<&str> = signed.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["x-amz-date", "x-amz-security-token", "authorization"]);
    }

    #[test]
    fn test_canonical_uri_encodes_segments_twice() {
        let url = Url::parse("https://rds.us-east-1.amazonaws.com/v13/a%20b/c").unwrap();
        assert_eq!(canonical_uri(&url), "/v13/a%2520b/c");

        let url = Url::parse("https://rds.us-east-1.amazonaws.com").unwrap();
        assert_eq!(canonical_uri(&url), "/");
    }

    #[test]
    fn test_canonical_query_sorts_and_encodes() {
        let url = Url::parse("https://example.com/?b=2&a=x+y&Marker=p%2Fq").unwrap();
        assert_eq!(canonical_query(&url), "Marker=p%2Fq&a=x%20y&b=2");

        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(canonical_query(&url), "");
    }

    #[test]
    fn test_host_header_keeps_explicit_port() {
        let url = Url::parse("http://127.0.0.1:4566/").unwrap();
        assert_eq!(host_header(&url).unwrap(), "127.0.0.1:4566");

        let url = Url::parse("https://rds.us-east-1.amazonaws.com:443/").unwrap();
        assert_eq!(host_header(&url).unwrap(), "rds.us-east-1.amazonaws.com");
    }
}
