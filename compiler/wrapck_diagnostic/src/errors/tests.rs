use super::*;

#[test]
fn test_every_code_is_documented() {
    for code in ErrorCode::ALL {
        assert!(ErrorDocs::has_docs(code), "{code} has no docs");
    }
    assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
}

#[test]
fn test_doc_heading_matches_code() {
    for code in ErrorCode::ALL {
        let doc = ErrorDocs::get(code).unwrap();
        assert!(
            doc.starts_with(&format!("# {code}:")),
            "doc for {code} starts with {:?}",
            doc.lines().next()
        );
    }
}
