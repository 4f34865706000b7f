use wasm_bindgen::prelude::*;

pub mod character;
pub mod controls;
pub mod game;
pub mod hud;
pub mod level;
pub mod ports;
pub mod resolver;
pub mod screen;
pub mod session;
pub mod tuning;

pub use game::Noclipper;

hv_web::export_game!(Noclipper, "noclipper");
