//! Construct-type analysis and re-indentation for multi-line history recall
//! ("Structure analysis" and "Recall with structural
//! preservation").

use core_syntax::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructKind {
    Simple,
    Pipeline,
    ForLoop,
    WhileLoop,
    IfStatement,
    CaseStatement,
    FunctionDef,
    Subshell,
    CommandSubstitution,
    HereDoc,
    Compound,
}

/// A structural summary of a (possibly multi-line) command, produced once
/// per recall and cached on the owning [`crate::HistoryEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRecord {
    pub kind: ConstructKind,
    pub line_count: usize,
    /// `(line index, keyword text)` pairs in source order.
    pub keyword_lines: Vec<(usize, String)>,
}

const BLOCK_OPENERS: &[&str] = &["for", "while", "until", "if", "function", "case"];
const BLOCK_CLOSERS: &[&str] = &["done", "fi", "esac"];
const ALIGN_WITH_OPENER: &[&str] = &["then", "else", "elif"];

/// Classifies the construct shape of `source` and records keyword
/// positions for later re-indentation.
pub fn analyze(source: &str) -> StructureRecord {
    let lines: Vec<&str> = source.lines().collect();
    let mut keyword_lines = Vec::new();
    let mut kind = ConstructKind::Simple;
    let mut saw_pipe = false;

    if lines.first().is_some_and(|l| l.trim_start().starts_with('(')) {
        kind = ConstructKind::Subshell;
    }

    for (i, line) in lines.iter().enumerate() {
        for tok in core_syntax::tokenize(line) {
            match tok.kind {
                TokenKind::Keyword => {
                    let text = tok.text(line).to_string();
                    if matches!(kind, ConstructKind::Simple) {
                        kind = match text.as_str() {
                            "for" => ConstructKind::ForLoop,
                            "while" | "until" => ConstructKind::WhileLoop,
                            "if" => ConstructKind::IfStatement,
                            "case" => ConstructKind::CaseStatement,
                            "function" => ConstructKind::FunctionDef,
                            _ => ConstructKind::Simple,
                        };
                    }
                    keyword_lines.push((i, text));
                }
                TokenKind::OperatorPipe => saw_pipe = true,
                TokenKind::HereDoc if matches!(kind, ConstructKind::Simple) => {
                    kind = ConstructKind::HereDoc;
                }
                TokenKind::CommandSubstitution if matches!(kind, ConstructKind::Simple) => {
                    kind = ConstructKind::CommandSubstitution;
                }
                _ => {}
            }
        }
    }

    if matches!(kind, ConstructKind::Simple) && saw_pipe {
        kind = ConstructKind::Pipeline;
    }
    if matches!(kind, ConstructKind::Simple) && lines.len() > 1 {
        kind = ConstructKind::Compound;
    }

    StructureRecord { kind, line_count: lines.len(), keyword_lines }
}

/// Re-indents a multi-line command: strips each line's original leading
/// whitespace and reapplies 2-space indentation per nesting depth, with
/// `then`/`else`/`elif`/`fi`/`done`/`esac` aligned one level shallower than
/// the body they open or close.
pub fn reindent(source: &str) -> String {
    let mut depth: i32 = 0;
    let mut out = Vec::with_capacity(source.lines().count());

    for raw_line in source.lines() {
        let trimmed = raw_line.trim_start();
        let first_word = trimmed.split_whitespace().next().unwrap_or("");
        let dedent_first =
            ALIGN_WITH_OPENER.contains(&first_word) || BLOCK_CLOSERS.contains(&first_word);
        let this_depth = if dedent_first { (depth - 1).max(0) } else { depth };
        out.push(format!("{}{trimmed}", "  ".repeat(this_depth as usize)));

        if BLOCK_OPENERS.contains(&first_word) {
            depth += 1;
        } else if BLOCK_CLOSERS.contains(&first_word) {
            depth = (depth - 1).max(0);
        }
    }
    out.join("\n")
}
