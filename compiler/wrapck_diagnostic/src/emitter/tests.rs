use super::*;

#[test]
fn test_describe_span() {
    let mut map = SourceMap::new();
    let file = map.add_file("a.go", "package a\nfunc A() {}\n");
    let span = map.span_at(file, 2, 6);
    assert_eq!(describe_span(Some(&map), span), "a.go:2:6");
    assert_eq!(describe_span(None, Span::new(3, 4)), "3..4");
    assert_eq!(describe_span(Some(&map), Span::DUMMY), "0..0");
}
