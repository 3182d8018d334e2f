//! Library side of the `lex` command: logging, tables, form files and exports.

pub mod edit;
pub mod export;
pub mod logging;
pub mod nuevo;
pub mod render;
