use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROFILE: &str = "DEFAULT";

#[derive(Debug, thiserror::Error)]
pub enum OciConfigError {
    #[error("Failed to read OCI config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed OCI config at line {line}: {content}")]
    Malformed { line: usize, content: String },
    #[error("Profile [{0}] not found in OCI config")]
    ProfileNotFound(String),
    #[error("Profile [{profile}] is missing required key `{key}`")]
    MissingKey { profile: String, key: &'static str },
    #[error("Passphrase-protected API keys are not supported (profile [{0}])")]
    EncryptedKey(String),
}

/// Connection profile read from an OCI SDK config file.
#[derive(Debug, Clone, PartialEq)]
pub struct OciProfile {
    pub user: String,
    pub fingerprint: String,
    pub tenancy: String,
    pub region: String,
    pub key_file: PathBuf,
}

impl OciProfile {
    pub fn from_file(path: &Path, profile: &str) -> Result<Self, OciConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| OciConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let profile = Self::parse(&contents, profile)?;
        log::info!(
            "Loaded OCI profile for region {} from {}",
            profile.region,
            path.display()
        );
        Ok(profile)
    }

    pub fn parse(contents: &str, profile: &str) -> Result<Self, OciConfigError> {
        let sections = parse_sections(contents)?;

        let defaults = sections.get(DEFAULT_PROFILE);
        let selected = sections
            .get(profile)
            .ok_or_else(|| OciConfigError::ProfileNotFound(profile.to_string()))?;

        // Named profiles fall back to [DEFAULT] for any key they omit.
        let lookup = |key: &'static str| -> Result<String, OciConfigError> {
            selected
                .get(key)
                .or_else(|| defaults.and_then(|d| d.get(key)))
                .filter(|value| !value.is_empty())
                .cloned()
                .ok_or(OciConfigError::MissingKey {
                    profile: profile.to_string(),
                    key,
                })
        };

        if lookup("pass_phrase").is_ok() {
            return Err(OciConfigError::EncryptedKey(profile.to_string()));
        }

        Ok(Self {
            user: lookup("user")?,
            fingerprint: lookup("fingerprint")?,
            tenancy: lookup("tenancy")?,
            region: lookup("region")?,
            key_file: expand_home(&lookup("key_file")?),
        })
    }

    /// Key identifier used in the `Authorization` signature header.
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }
}

fn parse_sections(
    contents: &str,
) -> Result<HashMap<String, HashMap<String, String>>, OciConfigError> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let malformed = || OciConfigError::Malformed {
            line: idx + 1,
            content: raw.to_string(),
        };
        let (key, value) = line.split_once('=').ok_or_else(malformed)?;
        let section = current.as_ref().ok_or_else(malformed)?;

        sections
            .entry(section.clone())
            .or_default()
            .insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(sections)
}

/// Expands a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
