use super::*;

const WITH_STACK: &str = "func github.com/cockroachdb/errors.WithStack(err error) error";

#[test]
fn missing_scope_is_rejected() {
    assert_eq!(
        WrapPolicy::new("", [WITH_STACK]),
        Err(PolicyError::MissingScope)
    );
    assert_eq!(
        WrapPolicy::new("  ", Vec::<String>::new()),
        Err(PolicyError::MissingScope)
    );
}

#[test]
fn scope_matches_on_segments() {
    let policy = WrapPolicy::new("example.com/svc", [WITH_STACK]).unwrap();
    assert!(policy.in_scope("example.com/svc"));
    assert!(policy.in_scope("example.com/svc/db"));
    assert!(!policy.in_scope("example.com/svc2"));
    assert!(!policy.in_scope("encoding/json"));
}

#[test]
fn trailing_slash_is_normalized() {
    let policy = WrapPolicy::new("interface_no_wrap/", [WITH_STACK]).unwrap();
    assert_eq!(policy.scope(), "interface_no_wrap");
    assert!(policy.in_scope("interface_no_wrap/a"));
}

#[test]
fn wrappers_match_exactly() {
    let policy = WrapPolicy::new("a", [WITH_STACK, WITH_STACK]).unwrap();
    assert_eq!(policy.wrappers().len(), 1);
    assert!(policy.is_wrapper(WITH_STACK));
    assert!(!policy.is_wrapper("func github.com/cockroachdb/errors.WithStack(err error)"));
    assert!(!policy.is_wrapper("func fmt.Errorf(format string, a ...any) error"));
}
