pub mod clock;
pub mod parse;
