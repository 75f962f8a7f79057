pub mod matching;
pub mod session;
pub mod source;
pub mod speech;
