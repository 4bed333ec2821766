use pascal_lex::scanner;

fn render_tokens(source: &str) -> Vec<String> {
    let (tokens, diagnostics) = scanner::scan(source);
    assert!(!diagnostics.had_error(), "scan should be clean");
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn fixture_hello() {
    let source = include_str!("../fixtures/hello.pas");
    let expected = include_str!("../fixtures/hello.expected");
    let output = render_tokens(source);
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(output, expected_lines);
}

#[test]
fn fixture_control() {
    let source = include_str!("../fixtures/control.pas");
    let expected = include_str!("../fixtures/control.expected");
    let output = render_tokens(source);
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(output, expected_lines);
}

#[test]
fn fixture_literals() {
    let source = include_str!("../fixtures/literals.pas");
    let expected = include_str!("../fixtures/literals.expected");
    let output = render_tokens(source);
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(output, expected_lines);
}

#[test]
fn tokens_serialize_to_json() {
    let (tokens, diagnostics) = scanner::scan("x := 1");
    assert!(!diagnostics.had_error());
    let json = serde_json::to_string(&tokens).expect("tokens should serialize");
    assert!(json.contains("\"Identifier\""));
    assert!(json.contains("\"Assign\""));
    assert!(json.contains("\"Eof\""));
}
