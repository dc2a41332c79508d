//! OAuth 1.0a request signing (HMAC-SHA1), as required for user-context
//! writes to the X/Twitter API.

use crate::config::Credentials;
use base64::{prelude::BASE64_STANDARD, Engine};
use hmac::{digest::InvalidLength, Hmac, Mac};
use itertools::Itertools;
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;
use std::time::{SystemTime, UNIX_EPOCH};
use urlencoding::encode;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const VERSION: &str = "1.0";
const NONCE_LENGTH: usize = 32;

pub struct OAuth1Signer {
    credentials: Credentials,
}

impl OAuth1Signer {
    pub fn new(credentials: Credentials) -> Self {
        OAuth1Signer { credentials }
    }

    /// `Authorization` header value for a request. `params` are the query or
    /// form parameters of the request; JSON bodies are not signed.
    pub fn authorization_header(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, InvalidLength> {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();

        self.authorization_header_with(method, url, params, &nonce, timestamp)
    }

    fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: u64,
    ) -> Result<String, InvalidLength> {
        let timestamp = timestamp.to_string();
        let mut oauth_params = vec![
            ("oauth_consumer_key", self.credentials.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", SIGNATURE_METHOD),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.credentials.access_token.as_str()),
            ("oauth_version", VERSION),
        ];

        let all_params: Vec<(&str, &str)> =
            oauth_params.iter().chain(params.iter()).copied().collect();
        let signature = self.signature(method, url, &all_params)?;
        oauth_params.push(("oauth_signature", signature.as_str()));

        let header = oauth_params
            .iter()
            .map(|(key, value)| (encode(key), encode(value)))
            .sorted()
            .map(|(key, value)| format!("{}=\"{}\"", key, value))
            .join(", ");

        Ok(format!("OAuth {}", header))
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<String, InvalidLength> {
        let parameter_string = params
            .iter()
            .map(|(key, value)| (encode(key), encode(value)))
            .sorted()
            .map(|(key, value)| format!("{}={}", key, value))
            .join("&");

        let base = format!(
            "{}&{}&{}",
            method.to_uppercase(),
            encode(url),
            encode(&parameter_string)
        );
        let key = format!(
            "{}&{}",
            encode(&self.credentials.consumer_secret),
            encode(&self.credentials.access_token_secret)
        );

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())?;
        mac.update(base.as_bytes());

        Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
    }
}
