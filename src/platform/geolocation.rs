//! Browser geolocation as a future

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{GeolocationPosition, PositionOptions};

use crate::weather::Coordinates;

/// Current position, or `None` on denial, timeout, or no location service
pub async fn current_position(timeout_ms: u32) -> Option<Coordinates> {
    let geolocation = match web_sys::window()?.navigator().geolocation() {
        Ok(g) => g,
        Err(_) => {
            log::info!("Geolocation unavailable");
            return None;
        }
    };

    let options = PositionOptions::new();
    options.set_timeout(timeout_ms);

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
            &resolve,
            Some(&reject),
            &options,
        ) {
            let _ = reject.call1(&wasm_bindgen::JsValue::NULL, &e);
        }
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            let position: GeolocationPosition = value.unchecked_into();
            let coords = position.coords();
            Some(Coordinates {
                latitude: coords.latitude(),
                longitude: coords.longitude(),
            })
        }
        Err(e) => {
            log::info!("Geolocation failed: {e:?}");
            None
        }
    }
}
