pub mod encoding;
pub mod whitespace;

pub use encoding::{ControlChars, StripBom};
pub use whitespace::{
    CollapseBlankLines, FinalNewline, NormalizeLineEndings, TabsToSpaces, TrailingWhitespace,
};
