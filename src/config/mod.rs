pub mod settings;
pub mod sports;
