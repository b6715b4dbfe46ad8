//! SuggestionGenerator の実装
//!
//! - `gated`: タイムアウト・回数制限・応答検証をかけるラッパー
//! - `gemini`: Gemini API を呼び出す実装
//! - `disabled`: API キー未設定時に常に「利用不可」を返す実装

pub mod disabled;
pub mod gated;
pub mod gemini;

pub use disabled::DisabledSuggestionGenerator;
pub use gated::{GatedSuggestionGenerator, GeneratorLimits};
pub use gemini::GeminiSuggestionGenerator;
