pub mod runner;

pub use hv_engine;
pub use runner::GameRunner;

/// Expand to the `#[wasm_bindgen]` surface of a game: one runner per thread,
/// lifecycle and input entry points, and pointer/size getters the front-end
/// uses to read the frame buffer.
///
/// The invoking crate must have `wasm_bindgen::prelude::*` in scope and
/// depend on `log`, `console_log` and `console_error_panic_hook`. The game
/// type needs a `new()` constructor.
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// hv_web::export_game!(MyGame, "my-game");
/// ```
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use $crate::hv_engine::InputEvent;

        thread_local! {
            static RUNNER: std::cell::RefCell<Option<$crate::GameRunner<$game_type>>> =
                std::cell::RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut slot = cell.borrow_mut();
                let runner = slot.as_mut().expect("game_init() must run before any other export");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let runner = $crate::GameRunner::new(<$game_type>::new());
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            with_runner(|r| r.init());
            log::info!("{} started", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        // Frame data, valid until the next game_tick.
        $crate::export_getter!(get_frame_ptr, frame_ptr, *const f32);
        $crate::export_getter!(get_instances_ptr, instances_ptr, *const f32);
        $crate::export_getter!(get_instance_count, instance_count, u32);
        $crate::export_getter!(get_batches_ptr, batches_ptr, *const u32);
        $crate::export_getter!(get_batch_count, batch_count, u32);
        $crate::export_getter!(get_game_events_ptr, game_events_ptr, *const f32);
        $crate::export_getter!(get_game_events_len, game_events_len, u32);
        $crate::export_getter!(get_world_width, world_width, f32);
        $crate::export_getter!(get_world_height, world_height, f32);
        $crate::export_getter!(get_camera_x, camera_x, f32);
        $crate::export_getter!(get_camera_y, camera_y, f32);

        // Fixed for the lifetime of the runner.
        $crate::export_getter!(get_max_instances, max_instances, u32);
        $crate::export_getter!(get_max_batches, max_batches, u32);
        $crate::export_getter!(get_max_events, max_events, u32);
        $crate::export_getter!(get_buffer_total_floats, buffer_total_floats, u32);
    };
}

/// One `#[wasm_bindgen]` function forwarding to a `GameRunner` accessor.
/// Used by [`export_game!`]; expects its `with_runner` helper in scope.
#[doc(hidden)]
#[macro_export]
macro_rules! export_getter {
    ($export:ident, $method:ident, $ty:ty) => {
        #[wasm_bindgen]
        pub fn $export() -> $ty {
            with_runner(|r| r.$method())
        }
    };
}
