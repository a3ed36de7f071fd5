//! Shell-lexical syntax highlighting tokenizer: a two-pass
//! design — a shape-based lexer followed by a context-aware classifier —
//! plus the scope rules an incremental highlighter uses to decide how much
//! of an edited line it needs to redo.

pub mod classifier;
pub mod incremental;
pub mod keywords;
pub mod lexer;
pub mod token;

pub use incremental::{IncrementalTokenizer, ReparseScope};
pub use token::{Token, TokenKind};

use tracing::trace;

/// Tokenizes a full line (or multiline buffer snapshot) of shell text:
/// first pass shapes the bytes into tokens, second pass reclassifies
/// `Word` tokens using command-position context. Never fails — unparsable
/// input surfaces as `Error*` token kinds rather than an `Err`, so a
/// highlighter can always render something.
pub fn tokenize(content: &str) -> Vec<Token> {
    let tokens = lexer::lex(content);
    let tokens = classifier::classify(content, tokens);
    trace!(target: "syntax.tokenize", len = content.len(), count = tokens.len(), "tokenized");
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_combines_lexing_and_classification() {
        let tokens = tokenize("cd /tmp && ls -la | grep foo");
        let commandish: Vec<_> = tokens
            .iter()
            .filter(|t| {
                matches!(t.kind, TokenKind::Builtin | TokenKind::Command)
            })
            .map(|t| t.text("cd /tmp && ls -la | grep foo"))
            .collect();
        assert_eq!(commandish, vec!["cd", "ls", "grep"]);
    }

    #[test]
    fn tokenize_never_panics_on_empty_input() {
        assert!(tokenize("").is_empty());
    }
}
