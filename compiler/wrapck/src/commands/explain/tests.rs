use super::*;

#[test]
fn every_code_is_documented() {
    for code in ErrorCode::ALL {
        let doc = explain(code.as_str()).unwrap();
        assert!(doc.starts_with(&format!("# {code}")), "{code}");
    }
}

#[test]
fn codes_are_case_insensitive() {
    assert_eq!(explain("e1003").unwrap(), explain("E1003").unwrap());
}

#[test]
fn unknown_code() {
    let err = explain("E9999").unwrap_err();
    assert!(matches!(err, DriverError::UnknownCode(_)));
    assert_eq!(err.to_string(), "unknown error code `E9999`");
}
