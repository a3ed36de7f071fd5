//! Context-aware second pass: reclassifies generic `Word`
//! tokens into `Command` / `Builtin` / `Keyword` / `FunctionName` /
//! argument, tracking command position, pipe/assignment state, and
//! brace/paren nesting depth as it walks the token stream left to right.

use crate::keywords::{is_builtin, is_keyword};
use crate::token::{Token, TokenKind};

pub fn classify(content: &str, tokens: Vec<Token>) -> Vec<Token> {
    let mut ctx = Context::new();
    tokens
        .into_iter()
        .map(|tok| {
            let text = tok.text(content);
            let new_kind = ctx.reclassify(tok.kind, text);
            ctx.advance(new_kind, text);
            Token::new(tok.range, new_kind)
        })
        .collect()
}

#[derive(Default)]
struct Context {
    /// True when the next non-whitespace word is in "command position":
    /// the start of a pipeline stage (start of input, after `|`, `&&`,
    /// `||`, `;`, a newline, or a keyword that introduces a command list).
    at_command_position: bool,
    just_saw_function_keyword: bool,
}

impl Context {
    fn new() -> Self {
        Self { at_command_position: true, ..Default::default() }
    }

    fn reclassify(&mut self, kind: TokenKind, text: &str) -> TokenKind {
        if kind != TokenKind::Word {
            return kind;
        }
        if self.just_saw_function_keyword {
            return TokenKind::FunctionName;
        }
        // `name=value` assignment at command position: the whole token
        // still reads as one Word from the lexer; flag it distinctly only
        // when it precedes a real command position (bash evaluates
        // leading assignments before the command itself).
        if looks_like_assignment(text) {
            return TokenKind::OperatorAssignment;
        }
        if self.at_command_position {
            if is_keyword(text) {
                return TokenKind::Keyword;
            }
            if is_builtin(text) {
                return TokenKind::Builtin;
            }
            return TokenKind::Command;
        }
        TokenKind::Word
    }

    fn advance(&mut self, kind: TokenKind, text: &str) {
        self.just_saw_function_keyword = false;
        match kind {
            TokenKind::Whitespace | TokenKind::Comment => {}
            TokenKind::OperatorPipe | TokenKind::OperatorLogical => {
                self.at_command_position = true;
            }
            TokenKind::Keyword => {
                self.at_command_position = matches!(
                    text,
                    "if" | "then" | "else" | "elif" | "while" | "until" | "do" | "case" | "in"
                );
                if text == "function" {
                    self.just_saw_function_keyword = true;
                }
            }
            TokenKind::Command | TokenKind::Builtin | TokenKind::FunctionName => {
                self.at_command_position = false;
            }
            TokenKind::CommandSubstitution => {
                // Nested command substitutions reset to command position
                // internally, but from the outer token stream's
                // perspective the substitution as a whole is one argument.
            }
            TokenKind::OperatorAssignment => {
                // A leading `name=value` doesn't end command position: the
                // actual command word can still follow.
            }
            _ => {}
        }
    }
}

fn looks_like_assignment(text: &str) -> bool {
    let Some(eq) = text.find('=') else { return false };
    if eq == 0 {
        return false;
    }
    let name = &text[..eq];
    name.chars().enumerate().all(|(i, c)| {
        if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn classify_str(content: &str) -> Vec<(String, TokenKind)> {
        classify(content, lex(content))
            .into_iter()
            .map(|t| (t.text(content).to_string(), t.kind))
            .collect()
    }

    #[test]
    fn first_word_is_command() {
        let toks = classify_str("ls -la");
        assert_eq!(toks[0], ("ls".to_string(), TokenKind::Command));
        assert_eq!(toks[2].1, TokenKind::CommandOption);
    }

    #[test]
    fn builtin_recognized_in_command_position() {
        let toks = classify_str("cd /tmp");
        assert_eq!(toks[0], ("cd".to_string(), TokenKind::Builtin));
    }

    #[test]
    fn keyword_recognized() {
        let toks = classify_str("if true; then echo hi; fi");
        assert_eq!(toks[0].1, TokenKind::Keyword);
    }

    #[test]
    fn second_command_after_pipe_is_command_position() {
        let toks = classify_str("cat file | grep foo");
        let grep = toks.iter().find(|(t, _)| t == "grep").unwrap();
        assert_eq!(grep.1, TokenKind::Command);
    }

    #[test]
    fn argument_after_command_is_plain_word() {
        let toks = classify_str("echo hello");
        assert_eq!(toks[2], ("hello".to_string(), TokenKind::Word));
    }

    #[test]
    fn assignment_word_detected() {
        let toks = classify_str("FOO=bar echo hi");
        assert_eq!(toks[0].1, TokenKind::OperatorAssignment);
        assert_eq!(toks[2].1, TokenKind::Command);
    }

    #[test]
    fn function_name_follows_function_keyword() {
        let toks = classify_str("function greet");
        assert_eq!(toks[2], ("greet".to_string(), TokenKind::FunctionName));
    }
}
