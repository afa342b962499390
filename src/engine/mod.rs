pub mod characters;
pub mod rules;
