pub mod generate;
pub mod list;
pub mod template;
pub mod validate;
