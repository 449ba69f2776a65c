pub mod gif;
pub mod help;
pub mod info;
