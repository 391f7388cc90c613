pub mod joiner;
pub mod scanner;
pub mod splitter;
pub mod terminator;
