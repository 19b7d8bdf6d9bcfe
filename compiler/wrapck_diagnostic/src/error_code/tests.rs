use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E1003.as_str(), "E1003");
}

#[test]
fn test_descriptions_are_templates() {
    assert_eq!(
        ErrorCode::E1002.description(),
        "error returned from an external/unanalyzed unit is not wrapped"
    );
    assert_eq!(ErrorCode::E1003.description(), "error returned is not wrapped");
}

#[test]
fn test_parse() {
    assert_eq!("E1001".parse::<ErrorCode>(), Ok(ErrorCode::E1001));
    assert_eq!("e1002".parse::<ErrorCode>(), Ok(ErrorCode::E1002));
    assert!("E9999".parse::<ErrorCode>().is_err());
}
