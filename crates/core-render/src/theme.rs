//! Token-to-color mapping, adapted to the detected terminal color depth
//! (truecolor → 256 → 16 → mono fallbacks).

use core_syntax::TokenKind;
use core_terminal::ColorDepth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticColor {
    Command,
    Builtin,
    Keyword,
    FunctionName,
    Variable,
    StringLiteral,
    Operator,
    Path,
    Glob,
    Comment,
    ErrorToken,
    Plain,
}

/// A host-supplied color scheme. The engine ships [`DefaultTheme`]; hosts
/// may implement their own to rebind semantic colors without touching the
/// render pipeline.
pub trait ThemeProvider {
    fn color_for(&self, kind: TokenKind) -> SemanticColor;
    fn rgb_for(&self, color: SemanticColor, depth: ColorDepth) -> Rgb;
}

pub struct DefaultTheme;

impl ThemeProvider for DefaultTheme {
    fn color_for(&self, kind: TokenKind) -> SemanticColor {
        use TokenKind::*;
        match kind {
            Command => SemanticColor::Command,
            Builtin => SemanticColor::Builtin,
            Keyword => SemanticColor::Keyword,
            FunctionName => SemanticColor::FunctionName,
            Variable | ParameterExpansion | CommandSubstitution | ArithmeticExpansion => {
                SemanticColor::Variable
            }
            SingleQuoteString | DoubleQuoteString | BacktickString | HereDoc => {
                SemanticColor::StringLiteral
            }
            OperatorPipe | OperatorRedirect | OperatorLogical | OperatorAssignment
            | OperatorComparison | OperatorArithmetic => SemanticColor::Operator,
            PathAbsolute | PathRelative | PathHome => SemanticColor::Path,
            Glob => SemanticColor::Glob,
            Comment | Shebang => SemanticColor::Comment,
            ErrorUnmatchedQuote | ErrorUnmatchedBracket | ErrorInvalidSequence => {
                SemanticColor::ErrorToken
            }
            Whitespace | Word | Number | Escape | CommandOption => SemanticColor::Plain,
        }
    }

    fn rgb_for(&self, color: SemanticColor, depth: ColorDepth) -> Rgb {
        // The same semantic palette at every depth; `depth` only decides
        // how the emitter downstream encodes it (truecolor SGR, 256-color
        // index, 16-color index, or no color at all). Mono output is the
        // caller's job to suppress entirely when `depth == ColorDepth::None`.
        let _ = depth;
        match color {
            SemanticColor::Command => Rgb(0x4e, 0xc9, 0xb0),
            SemanticColor::Builtin => Rgb(0x56, 0x9c, 0xd6),
            SemanticColor::Keyword => Rgb(0xc5, 0x86, 0xc0),
            SemanticColor::FunctionName => Rgb(0xdc, 0xdc, 0xaa),
            SemanticColor::Variable => Rgb(0x9c, 0xdc, 0xfe),
            SemanticColor::StringLiteral => Rgb(0xce, 0x91, 0x78),
            SemanticColor::Operator => Rgb(0xd4, 0xd4, 0xd4),
            SemanticColor::Path => Rgb(0x4f, 0xc1, 0xff),
            SemanticColor::Glob => Rgb(0xd7, 0xba, 0x7d),
            SemanticColor::Comment => Rgb(0x6a, 0x99, 0x55),
            SemanticColor::ErrorToken => Rgb(0xf4, 0x47, 0x47),
            SemanticColor::Plain => Rgb(0xd4, 0xd4, 0xd4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_tokens_get_a_distinct_color_from_plain_words() {
        let theme = DefaultTheme;
        let error_color = theme.color_for(TokenKind::ErrorUnmatchedQuote);
        let plain_color = theme.color_for(TokenKind::Word);
        assert_ne!(
            theme.rgb_for(error_color, ColorDepth::TrueColor),
            theme.rgb_for(plain_color, ColorDepth::TrueColor)
        );
    }

    #[test]
    fn builtin_and_command_map_to_different_colors() {
        let theme = DefaultTheme;
        assert_ne!(theme.color_for(TokenKind::Builtin), theme.color_for(TokenKind::Command));
    }
}
