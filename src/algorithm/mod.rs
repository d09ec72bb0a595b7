pub mod animation;
pub mod follow;
pub mod mapping;
pub mod placement;
