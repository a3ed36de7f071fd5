use core_syntax::{tokenize, TokenKind};

fn kind_of(content: &str, needle: &str) -> TokenKind {
    let tokens = tokenize(content);
    tokens
        .iter()
        .find(|t| t.text(content) == needle)
        .unwrap_or_else(|| panic!("no token matched {needle:?} in {content:?}"))
        .kind
}

#[test]
fn assignment_then_pipeline_classifies_each_stage() {
    let content = "FOO=bar cmd1 --flag | cmd2 arg";
    assert_eq!(kind_of(content, "FOO=bar"), TokenKind::OperatorAssignment);
    assert_eq!(kind_of(content, "cmd1"), TokenKind::Command);
    assert_eq!(kind_of(content, "--flag"), TokenKind::CommandOption);
    assert_eq!(kind_of(content, "cmd2"), TokenKind::Command);
    assert_eq!(kind_of(content, "arg"), TokenKind::Word);
}

#[test]
fn control_flow_keywords_and_command_inside_if() {
    let content = "if grep -q foo file; then echo yes; fi";
    assert_eq!(kind_of(content, "if"), TokenKind::Keyword);
    assert_eq!(kind_of(content, "grep"), TokenKind::Command);
    assert_eq!(kind_of(content, "then"), TokenKind::Keyword);
    assert_eq!(kind_of(content, "echo"), TokenKind::Builtin);
    assert_eq!(kind_of(content, "fi"), TokenKind::Keyword);
}

#[test]
fn heredoc_body_is_tagged_and_does_not_get_reclassified_as_commands() {
    let content = "cat <<EOF\nls -la\nEOF\n";
    let tokens = tokenize(content);
    assert!(tokens.iter().any(|t| t.kind == TokenKind::HereDoc));
    // the "ls" inside the heredoc body is literal heredoc content, not a
    // second command: it must not appear as a separate Command token.
    assert!(!tokens.iter().any(|t| t.kind == TokenKind::Command && t.text(content) == "ls"));
}

#[test]
fn unterminated_double_quote_surfaces_as_error_without_panicking() {
    let content = "echo \"unterminated";
    let tokens = tokenize(content);
    assert!(tokens.iter().any(|t| t.is_error()));
}

#[test]
fn nested_command_substitution_argument_keeps_outer_word_as_argument() {
    let content = "echo $(date +%s)";
    assert_eq!(kind_of(content, "echo"), TokenKind::Builtin);
    let tokens = tokenize(content);
    assert!(tokens.iter().any(|t| t.kind == TokenKind::CommandSubstitution));
}

#[test]
fn function_definition_tags_the_name() {
    assert_eq!(kind_of("function deploy", "deploy"), TokenKind::FunctionName);
}
