pub mod provider;
pub mod selector;
