use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha2::{Digest, Sha256};

use super::config::OciProfile;

const SIGNED_HEADERS: &str = "date (request-target) host content-length content-type x-content-sha256";

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Failed to read API key {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported or invalid PEM private key: {0}")]
    InvalidKey(String),
}

/// Headers attached to a signed request.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedHeaders {
    pub date: String,
    pub content_sha256: String,
    pub content_length: usize,
    pub authorization: String,
}

/// Signs outbound requests with the OCI HTTP signature scheme (rsa-sha256).
#[derive(Clone)]
pub struct RequestSigner {
    key_id: String,
    signing_key: SigningKey<Sha256>,
}

impl RequestSigner {
    pub fn from_profile(profile: &OciProfile) -> Result<Self, SignerError> {
        let pem =
            std::fs::read_to_string(&profile.key_file).map_err(|source| SignerError::KeyFile {
                path: profile.key_file.display().to_string(),
                source,
            })?;
        Self::from_pem(profile.key_id(), &pem)
    }

    pub fn from_pem(key_id: String, pem: &str) -> Result<Self, SignerError> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;

        Ok(Self {
            key_id,
            signing_key: SigningKey::<Sha256>::new(private_key),
        })
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Signs a JSON `POST` to `path` on `host`, dated `date` (RFC 7231 format).
    pub fn sign_post(&self, host: &str, path: &str, body: &[u8], date: &str) -> SignedHeaders {
        let content_sha256 = STANDARD.encode(Sha256::digest(body));
        let content_length = body.len();

        let signing_string = signing_string(host, path, content_length, &content_sha256, date);
        let signature = self.signing_key.sign(signing_string.as_bytes());

        let authorization = format!(
            "Signature version=\"1\",keyId=\"{}\",algorithm=\"rsa-sha256\",headers=\"{}\",signature=\"{}\"",
            self.key_id,
            SIGNED_HEADERS,
            STANDARD.encode(signature.to_bytes())
        );

        SignedHeaders {
            date: date.to_string(),
            content_sha256,
            content_length,
            authorization,
        }
    }
}

fn signing_string(
    host: &str,
    path: &str,
    content_length: usize,
    content_sha256: &str,
    date: &str,
) -> String {
    [
        format!("date: {}", date),
        format!("(request-target): post {}", path),
        format!("host: {}", host),
        format!("content-length: {}", content_length),
        "content-type: application/json".to_string(),
        format!("x-content-sha256: {}", content_sha256),
    ]
    .join("\n")
}

/// Current time formatted for the `date` header.
pub fn http_date() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const PKCS8_KEY: &str = include_str!("../../testdata/oci_api_key.pem");
    const PKCS1_KEY: &str = include_str!("../../testdata/oci_api_key_pkcs1.pem");

    const HOST: &str = "vision.aiservice.us-ashburn-1.oci.oraclecloud.com";
    const PATH: &str = "/20220125/actions/analyzeImage";
    const DATE: &str = "Thu, 05 Jan 2014 21:31:40 GMT";
    const BODY: &[u8] = br#"{"hello":"world"}"#;

    // Produced with `openssl dgst -sha256 -sign testdata/oci_api_key.pem` over the
    // signing string for HOST/PATH/DATE/BODY.
    const EXPECTED_SIGNATURE: &str = "Dgussyaoa/97/3Mpcn8Wtl1+9vrl2ic3/MLA5B5kkBznDAPDVQ/ez8NkZ2icm0A4lxHbypiXnwxRFeET9Mdwvw9gqi8f9VEv/2KtdXMgelPJrFvEjwRms5Y6NyF9vyOotUNvMICphQGwWbMkmNjrP3k5nTLMAJ6CbUjMWXBrjvkQEGsK/V5POOcBPbQL5wHKRaCk4g2S55GG6kyo9+A5oHSUeYjoMxXhEHXHAAR1wBaiZkE9TflkuAxUECVL4oY7icjU5npA2Q6fPLMz3sEisE7ErEW0BWoLHlH/ZYqVJsTSYsbtM1G5GTVqk8CpL7kMXL01ceXpB29pM1MPGWTwNA==";

    #[test]
    fn builds_signing_string_in_header_order() {
        let s = signing_string(HOST, PATH, 17, "abc=", DATE);
        assert_eq!(
            s,
            "date: Thu, 05 Jan 2014 21:31:40 GMT\n\
             (request-target): post /20220125/actions/analyzeImage\n\
             host: vision.aiservice.us-ashburn-1.oci.oraclecloud.com\n\
             content-length: 17\n\
             content-type: application/json\n\
             x-content-sha256: abc="
        );
    }

    #[test]
    fn signature_matches_openssl() {
        let signer = RequestSigner::from_pem("t/u/f".into(), PKCS8_KEY).unwrap();
        let headers = signer.sign_post(HOST, PATH, BODY, DATE);

        assert_eq!(
            headers.content_sha256,
            "k6I5cakU5erL8KjSUVTNownDwccvu5kU1Hxg88toFYg="
        );
        assert_eq!(headers.content_length, 17);
        assert_eq!(
            headers.authorization,
            format!(
                "Signature version=\"1\",keyId=\"t/u/f\",algorithm=\"rsa-sha256\",headers=\"{}\",signature=\"{}\"",
                SIGNED_HEADERS, EXPECTED_SIGNATURE
            )
        );
    }

    #[test]
    fn pkcs1_key_signs_identically() {
        let pkcs8 = RequestSigner::from_pem("k".into(), PKCS8_KEY).unwrap();
        let pkcs1 = RequestSigner::from_pem("k".into(), PKCS1_KEY).unwrap();
        assert_eq!(
            pkcs8.sign_post(HOST, PATH, BODY, DATE),
            pkcs1.sign_post(HOST, PATH, BODY, DATE)
        );
    }

    #[test]
    fn rejects_garbage_key() {
        let err = RequestSigner::from_pem("k".into(), "not a key").err().unwrap();
        assert!(matches!(err, SignerError::InvalidKey(_)));
    }

    #[test]
    fn loads_key_named_by_profile() {
        let profile = OciProfile {
            user: "u".into(),
            fingerprint: "f".into(),
            tenancy: "t".into(),
            region: "us-ashburn-1".into(),
            key_file: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/testdata/oci_api_key.pem"
            )),
        };
        let signer = RequestSigner::from_profile(&profile).unwrap();
        assert_eq!(signer.key_id(), "t/u/f");
    }

    #[test]
    fn http_date_is_rfc7231() {
        let date = http_date();
        assert!(date.ends_with(" GMT"));
        assert!(chrono::NaiveDateTime::parse_from_str(&date, "%a, %d %b %Y %H:%M:%S GMT").is_ok());
    }
}
