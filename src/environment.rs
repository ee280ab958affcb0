use anyhow::{Context, Result};
use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;

/// Read a single `KEY=value` entry from an env-style file.
///
/// Returns `Ok(None)` when the file does not exist or the key is absent;
/// any other I/O error propagates. A single level of quoting around the
/// value is stripped.
pub fn read_key(path: &Path, key: &str) -> Result<Option<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let pattern = Regex::new(&format!(r"(?m)^\s*{}\s*=[ \t]*(.*)$", regex::escape(key)))?;

    Ok(pattern.captures(&content).map(|caps| {
        let raw = caps[1].trim();
        raw.trim_matches('"').trim_matches('\'').to_string()
    }))
}

/// Whether the env file marks this project as production-like.
///
/// Setup refuses to run against such a project; the check happens before
/// any mutating step.
pub fn is_production(env_file: &Path) -> Result<bool> {
    match read_key(env_file, "APP_ENV")? {
        Some(value) => Ok(matches!(
            value.to_ascii_lowercase().as_str(),
            "production" | "prod"
        )),
        None => Ok(false),
    }
}

/// Whether the env file carries a non-empty application key.
pub fn has_app_key(env_file: &Path) -> Result<bool> {
    Ok(read_key(env_file, "APP_KEY")?.is_some_and(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_env(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(".env");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_key_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_key(&dir.path().join(".env"), "APP_ENV").unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_read_key_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "APP_NAME=demo\n");
        assert_eq!(read_key(&path, "APP_ENV").unwrap(), None);
    }

    #[test]
    fn test_read_key_plain_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "APP_NAME=demo\nAPP_ENV=local\n");
        assert_eq!(read_key(&path, "APP_ENV").unwrap(), Some("local".to_string()));
    }

    #[test]
    fn test_read_key_quoted_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "APP_NAME=\"My App\"\n");
        assert_eq!(read_key(&path, "APP_NAME").unwrap(), Some("My App".to_string()));
    }

    #[test]
    fn test_read_key_empty_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "APP_KEY=\n");
        assert_eq!(read_key(&path, "APP_KEY").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_read_key_ignores_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "# APP_ENV=production\nAPP_ENV=local\n");
        assert_eq!(read_key(&path, "APP_ENV").unwrap(), Some("local".to_string()));
    }

    #[test]
    fn test_read_key_does_not_match_prefixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "MY_APP_ENV=production\n");
        assert_eq!(read_key(&path, "APP_ENV").unwrap(), None);
    }

    #[test]
    fn test_is_production() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "APP_ENV=production\n");
        assert!(is_production(&path).unwrap());

        let path = write_env(&dir, "APP_ENV=Prod\n");
        assert!(is_production(&path).unwrap());

        let path = write_env(&dir, "APP_ENV=local\n");
        assert!(!is_production(&path).unwrap());
    }

    #[test]
    fn test_is_production_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_production(&dir.path().join(".env")).unwrap());
    }

    #[test]
    fn test_has_app_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_env(&dir, "APP_KEY=base64:abcdef\n");
        assert!(has_app_key(&path).unwrap());

        let path = write_env(&dir, "APP_KEY=\n");
        assert!(!has_app_key(&path).unwrap());

        let path = write_env(&dir, "APP_NAME=demo\n");
        assert!(!has_app_key(&path).unwrap());
    }
}
