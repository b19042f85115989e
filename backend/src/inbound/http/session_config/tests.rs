//! Session settings validation across build modes.

use std::collections::HashMap;
use std::io::Write;

use mockable::{DefaultEnv, MockEnv};
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key file");
    file
}

#[fixture]
fn full_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn env_with(vars: &[(&'static str, String)]) -> MockEnv {
    let vars: HashMap<&'static str, String> = vars.iter().cloned().collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

fn release_vars(key: &NamedTempFile) -> Vec<(&'static str, String)> {
    vec![
        (KEY_FILE_ENV, key.path().display().to_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ]
}

fn with_override(
    mut vars: Vec<(&'static str, String)>,
    name: &'static str,
    value: Option<&str>,
) -> Vec<(&'static str, String)> {
    vars.retain(|(key, _)| *key != name);
    if let Some(value) = value {
        vars.push((name, value.to_owned()));
    }
    vars
}

fn release_error(vars: &[(&'static str, String)]) -> SessionConfigError {
    match session_settings_from_env(&env_with(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_explicit_settings(full_key: NamedTempFile) {
    let settings = session_settings_from_env(&env_with(&release_vars(&full_key)), BuildMode::Release)
        .expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.key_fingerprint().len(), 16);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_each_toggle(full_key: NamedTempFile, #[case] missing: &'static str) {
    let vars = with_override(release_vars(&full_key), missing, None);
    let error = release_error(&vars);
    assert!(
        matches!(error, SessionConfigError::MissingEnv { name } if name == missing),
        "unexpected error: {error}"
    );
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
fn release_rejects_invalid_values(
    full_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let vars = with_override(release_vars(&full_key), name, Some(value));
    let error = release_error(&vars);
    assert!(
        matches!(error, SessionConfigError::InvalidEnv { name: got, .. } if got == name),
        "unexpected error: {error}"
    );
}

#[rstest]
fn release_rejects_ephemeral_keys(full_key: NamedTempFile) {
    let vars = with_override(release_vars(&full_key), ALLOW_EPHEMERAL_ENV, Some("yes"));
    assert!(matches!(release_error(&vars), SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(SESSION_KEY_MIN_LEN - 1);
    let error = release_error(&release_vars(&short));
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_unreadable_key(full_key: NamedTempFile) {
    let vars = with_override(
        release_vars(&full_key),
        KEY_FILE_ENV,
        Some("/nonexistent/hostel/session_key"),
    );
    assert!(matches!(release_error(&vars), SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_insecure_same_site_none(full_key: NamedTempFile) {
    let vars = with_override(release_vars(&full_key), COOKIE_SECURE_ENV, Some("0"));
    let vars = with_override(vars, SAMESITE_ENV, Some("None"));
    assert!(matches!(release_error(&vars), SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let settings = session_settings_from_env(&env_with(&[]), BuildMode::Debug)
        .expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_accepts_short_keys_and_odd_values() {
    let short = key_file(40);
    let vars = vec![
        (KEY_FILE_ENV, short.path().display().to_string()),
        (COOKIE_SECURE_ENV, "perhaps".to_owned()),
        (SAMESITE_ENV, "None".to_owned()),
    ];
    let settings =
        session_settings_from_env(&env_with(&vars), BuildMode::Debug).expect("debug tolerates");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::None);
}

#[rstest]
fn debug_still_rejects_keys_too_short_to_derive_from() {
    let tiny = key_file(8);
    let vars = vec![(KEY_FILE_ENV, tiny.path().display().to_string())];
    let error = match session_settings_from_env(&env_with(&vars), BuildMode::Debug) {
        Ok(_) => panic!("an 8 byte key cannot seed the cookie key"),
        Err(error) => error,
    };
    assert!(matches!(error, SessionConfigError::KeyTooShort { min_len: 32, .. }));
}

#[rstest]
fn process_environment_is_read_through_default_env(full_key: NamedTempFile) {
    let path = full_key.path().display().to_string();
    let _guard = env_lock::lock_env([
        (KEY_FILE_ENV, Some(path.as_str())),
        (COOKIE_SECURE_ENV, Some("0")),
        (SAMESITE_ENV, Some("lax")),
        (ALLOW_EPHEMERAL_ENV, Some("0")),
    ]);
    let settings =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::Release).expect("env settings");
    assert!(!settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}
