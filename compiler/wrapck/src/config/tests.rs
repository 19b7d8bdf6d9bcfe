use std::io::Write;

use pretty_assertions::assert_eq;

use super::*;

const WITH_STACK: &str = "func github.com/cockroachdb/errors.WithStack(err error) error";

#[test]
fn parses_scope_and_wrappers() {
    let text = format!("scope = \"github.com/acme/svc\"\nwrappers = [\"{WITH_STACK}\"]\n");
    let config = Config::parse(&text, Path::new("wrapck.toml")).unwrap();
    assert_eq!(
        config,
        Config {
            scope: Some("github.com/acme/svc".to_string()),
            wrappers: vec![WITH_STACK.to_string()],
        }
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Config::parse("scope = \"a\"\nwrapers = []\n", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn missing_scope_is_fatal() {
    let err = Config::default().into_policy(None, &[]).unwrap_err();
    assert!(matches!(err, ConfigError::MissingScope));

    let config = Config {
        scope: Some("   ".to_string()),
        wrappers: Vec::new(),
    };
    assert!(matches!(
        config.into_policy(None, &[]),
        Err(ConfigError::MissingScope)
    ));
}

#[test]
fn command_line_overrides_scope_and_adds_wrappers() {
    let config = Config {
        scope: Some("from/file".to_string()),
        wrappers: vec![WITH_STACK.to_string()],
    };
    let extra = vec!["func github.com/acme/errs.Wrap(err error) error".to_string()];
    let policy = config
        .into_policy(Some("from/flag".to_string()), &extra)
        .unwrap();
    assert_eq!(policy.scope(), "from/flag");
    assert_eq!(policy.wrappers().len(), 2);
    assert!(policy.is_wrapper(WITH_STACK));
}

#[test]
fn explicit_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "scope = \"svc\"").unwrap();
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.scope.as_deref(), Some("svc"));
    assert!(config.wrappers.is_empty());
}
