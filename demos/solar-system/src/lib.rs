use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod orbit;
pub mod params;
pub mod scene;
pub use scene::SolarScene;

orrery_web::export_scene!(SolarScene, "solar-system");
