pub mod dom;
pub mod runner;

pub use dom::DomHost;
pub use runner::PageRunner;
pub use pitlane_engine::{PageConfig, Site};

/// Generate the `#[wasm_bindgen]` entry points for a site.
///
/// Generates:
/// - `page_init()`: build the page from the site's own config
/// - `page_init_with_config(json)`: same, with a JSON overlay on top of it
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod site;
/// use site::MySite;
///
/// pitlane_web::export_page!(MySite);
/// ```
///
/// The site type must implement `pitlane_engine::Site` and have a `new()`
/// constructor. The calling crate depends on `wasm-bindgen`, `log`,
/// `console_log` and `console_error_panic_hook`.
#[macro_export]
macro_rules! export_page {
    ($site_type:ty) => {
        fn init_logging() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        #[wasm_bindgen]
        pub fn page_init() -> Result<(), JsValue> {
            init_logging();
            let site = <$site_type>::new();
            let config = <$site_type as $crate::Site>::config(&site);
            $crate::runner::start(config, <$site_type as $crate::Site>::name(&site))
        }

        #[wasm_bindgen]
        pub fn page_init_with_config(json: &str) -> Result<(), JsValue> {
            init_logging();
            let site = <$site_type>::new();
            let config = <$site_type as $crate::Site>::config(&site)
                .overlay_json(json)
                .map_err(|err| JsValue::from_str(&err.to_string()))?;
            $crate::runner::start(config, <$site_type as $crate::Site>::name(&site))
        }
    };
}
