pub mod keys;
pub mod modifiers;
pub mod trigger;

#[cfg(feature = "hooks")]
pub mod hooks;
