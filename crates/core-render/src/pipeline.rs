//! The 8-step render pipeline ("Rendering steps"): extract
//! content, tokenize, apply color, compute prompt metrics, compute the
//! change set, detect no-ops, emit writes, position the cursor.

use core_terminal::ColorDepth;
use tracing::trace;

use crate::frame::RenderedFrame;
use crate::prompt_metrics::analyze_prompt;
use crate::tabs::{expand_tabs, visual_column_offset};
use crate::theme::{DefaultTheme, ThemeProvider};

/// One rendering request: the current buffer content, cursor, and prompt.
pub struct RenderInput<'a> {
    pub content: &'a str,
    pub cursor_codepoint: usize,
    pub prompt: &'a str,
    pub color_depth: ColorDepth,
    pub tab_width: u16,
}

/// A single terminal write emitted by the pipeline. `MoveToColumn` is the
/// only cursor-positioning op the pipeline ever emits — absolute
/// (`ESC[<col>G`), never relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    ClearLine,
    Print(String),
    MoveToColumn(u16),
}

pub struct RenderOutput {
    pub writes: Vec<WriteOp>,
    pub cursor_column: u16,
    /// True when step 6 detected no change and step 7 was skipped.
    pub skipped_noop: bool,
}

pub struct RenderPipeline {
    theme: Box<dyn ThemeProvider>,
    previous: Option<RenderedFrame>,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(Box::new(DefaultTheme))
    }
}

impl RenderPipeline {
    pub fn new(theme: Box<dyn ThemeProvider>) -> Self {
        Self { theme, previous: None }
    }

    /// Runs all 8 steps against `input`, returning the writes needed to
    /// bring the screen into agreement (empty if nothing changed).
    pub fn render(&mut self, input: RenderInput<'_>) -> RenderOutput {
        let expanded = expand_tabs(input.content, input.tab_width);

        // Step 2+3: tokenize and apply the color scheme. Error tokens
        // still render (with their own distinct color) rather than
        // blocking the rest of the line ("Error tokens").
        let tokens = core_syntax::tokenize(input.content);
        let styled = self.apply_colors(input.content, &tokens, input.color_depth);

        // Step 4: prompt metrics.
        let metrics = analyze_prompt(input.prompt);
        let cursor_column = metrics
            .command_column
            .saturating_add(visual_column_offset(input.content, input.cursor_codepoint, input.tab_width));

        let new_frame = RenderedFrame::new(input.prompt.to_string(), expanded.clone(), cursor_column);

        // Step 5+6: compute the change set, detect the no-op case.
        if self.previous.as_ref() == Some(&new_frame) {
            trace!(target: "render.pipeline", "no-op: frame unchanged");
            return RenderOutput { writes: Vec::new(), cursor_column, skipped_noop: true };
        }

        // Step 7: emit writes. Step 8: position the cursor absolutely.
        let writes = vec![
            WriteOp::ClearLine,
            WriteOp::Print(input.prompt.to_string()),
            WriteOp::Print(styled),
            WriteOp::MoveToColumn(cursor_column),
        ];

        self.previous = Some(new_frame);
        trace!(target: "render.pipeline", cursor_column, "emitted render writes");
        RenderOutput { writes, cursor_column, skipped_noop: false }
    }

    /// Step 3: maps each token to a color and wraps its text in the
    /// terminal's SGR escape for that color depth. `ColorDepth::None`
    /// emits no escapes at all (Minimal mode's adaptive terminal
    /// integration).
    fn apply_colors(&self, content: &str, tokens: &[core_syntax::Token], depth: ColorDepth) -> String {
        if depth == ColorDepth::None {
            return content.to_string();
        }
        let mut out = String::with_capacity(content.len() * 2);
        for tok in tokens {
            let text = tok.text(content);
            let semantic = self.theme.color_for(tok.kind);
            let rgb = self.theme.rgb_for(semantic, depth);
            out.push_str(&format!("\u{1b}[38;2;{};{};{}m{}\u{1b}[0m", rgb.0, rgb.1, rgb.2, text));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(content: &'a str, cursor: usize, prompt: &'a str) -> RenderInput<'a> {
        RenderInput { content, cursor_codepoint: cursor, prompt, color_depth: ColorDepth::TrueColor, tab_width: 4 }
    }

    #[test]
    fn first_render_is_never_a_noop() {
        let mut pipeline = RenderPipeline::default();
        let out = pipeline.render(input("echo hi", 7, "$ "));
        assert!(!out.skipped_noop);
        assert!(!out.writes.is_empty());
    }

    #[test]
    fn repeating_the_same_render_is_a_noop() {
        let mut pipeline = RenderPipeline::default();
        pipeline.render(input("echo hi", 7, "$ "));
        let out = pipeline.render(input("echo hi", 7, "$ "));
        assert!(out.skipped_noop);
        assert!(out.writes.is_empty());
    }

    #[test]
    fn cursor_column_matches_spec_round_trip_example() {
        let mut pipeline = RenderPipeline::default();
        let prompt = " ".repeat(62);
        let out = pipeline.render(input("echo hello", 10, &prompt));
        assert_eq!(out.cursor_column, 73);
    }

    #[test]
    fn deleting_a_character_is_visible_on_the_very_next_render() {
        // Regresses the "N deletes to become visible" null-termination
        // bug: a one-character shrink must never be mistaken for a no-op.
        let mut pipeline = RenderPipeline::default();
        pipeline.render(input("echo hi!", 8, "$ "));
        let out = pipeline.render(input("echo hi", 7, "$ "));
        assert!(!out.skipped_noop);
    }

    #[test]
    fn mono_depth_emits_no_ansi_escapes() {
        let mut pipeline = RenderPipeline::default();
        let out = pipeline.render(RenderInput {
            content: "echo hi",
            cursor_codepoint: 7,
            prompt: "$ ",
            color_depth: ColorDepth::None,
            tab_width: 4,
        });
        let printed = out
            .writes
            .iter()
            .filter_map(|w| match w {
                WriteOp::Print(s) => Some(s.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");
        assert!(!printed.contains('\u{1b}'));
    }
}
