pub mod archetypes;
pub mod filesystem;
pub mod templates;
