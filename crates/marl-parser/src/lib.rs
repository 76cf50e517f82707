pub mod cursor;
pub mod parser;

pub use cursor::TokenCursor;
pub use parser::{decode_string_literal, ParseMode, Parser};
