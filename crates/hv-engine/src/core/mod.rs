pub mod aabb;
pub mod scene;
pub mod time;
#[cfg(feature = "physics")]
pub mod physics;
#[cfg(feature = "physics")]
pub mod platformer;
