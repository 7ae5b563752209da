pub mod accounting;
pub mod data;
pub mod shell;
