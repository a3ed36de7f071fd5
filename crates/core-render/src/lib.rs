//! Render pipeline (component D of the line editor engine): buffer state
//! → screen state, prompt-metric analysis, absolute cursor positioning,
//! and syntax-token-to-color mapping.

pub mod frame;
pub mod pipeline;
pub mod prompt_metrics;
pub mod tabs;
pub mod theme;
pub mod timing;
pub mod viewport;

pub use frame::RenderedFrame;
pub use pipeline::{RenderInput, RenderOutput, RenderPipeline, WriteOp};
pub use prompt_metrics::{PromptMetrics, analyze_prompt};
pub use tabs::{expand_tabs, visual_column_offset};
pub use theme::{DefaultTheme, Rgb, SemanticColor, ThemeProvider};
pub use viewport::Viewport;
