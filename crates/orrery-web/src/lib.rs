pub mod runner;

pub use runner::SceneRunner;
pub use orrery_engine;

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_tick, panel input, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod scene;
/// use scene::MyScene;
///
/// orrery_web::export_scene!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$app_type`: The scene struct type that implements `orrery_engine::SceneApp` and `Default`
/// - `$app_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_scene {
    ($app_type:ty, $app_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$app_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner<$app_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn scene_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let app = <$app_type>::default();
            let runner = $crate::SceneRunner::new(app);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $app_name);
        }

        #[wasm_bindgen]
        pub fn scene_load_config(json: &str) -> bool {
            with_runner(|r| r.load_config(json))
        }

        #[wasm_bindgen]
        pub fn scene_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn scene_param_change(kind: u32, a: f32, b: f32, c: f32) {
            let input = $crate::orrery_engine::ParamInput::change(kind, [a, b, c]);
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Param(input)));
        }

        #[wasm_bindgen]
        pub fn scene_param_finish(kind: u32, a: f32, b: f32, c: f32) {
            let input = $crate::orrery_engine::ParamInput::finish(kind, [a, b, c]);
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Param(input)));
        }

        #[wasm_bindgen]
        pub fn scene_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn scene_panel_json() -> String {
            with_runner(|r| r.panel_json())
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr())
        }

        #[wasm_bindgen]
        pub fn get_nodes_ptr() -> *const f32 {
            with_runner(|r| r.nodes_ptr())
        }

        #[wasm_bindgen]
        pub fn get_node_count() -> u32 {
            with_runner(|r| r.node_count())
        }

        #[wasm_bindgen]
        pub fn get_star_positions_ptr() -> *const f32 {
            with_runner(|r| r.star_positions_ptr())
        }

        #[wasm_bindgen]
        pub fn get_star_colors_ptr() -> *const f32 {
            with_runner(|r| r.star_colors_ptr())
        }

        #[wasm_bindgen]
        pub fn get_star_count() -> u32 {
            with_runner(|r| r.star_count())
        }

        #[wasm_bindgen]
        pub fn get_star_generation() -> u32 {
            with_runner(|r| r.star_generation())
        }

        #[wasm_bindgen]
        pub fn get_star_size() -> f32 {
            with_runner(|r| r.star_size())
        }

        #[wasm_bindgen]
        pub fn get_events_ptr() -> *const f32 {
            with_runner(|r| r.events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        // ---- Lighting accessors ----

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(|r| r.ambient()[0])
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(|r| r.ambient()[1])
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(|r| r.ambient()[2])
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_nodes() -> u32 {
            with_runner(|r| r.max_nodes())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
