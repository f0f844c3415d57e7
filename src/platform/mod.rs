//! Platform abstraction layer
//!
//! Browser-only adapters behind the portable controllers:
//! - Storage (LocalStorage)
//! - Geolocation
//! - Blocking prompts

#[cfg(target_arch = "wasm32")]
pub mod geolocation;
#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;

/// Ask a blocking yes/no question (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn confirm(question: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(question).ok())
        .unwrap_or(false)
}

/// Native stub: never confirms
#[cfg(not(target_arch = "wasm32"))]
pub fn confirm(_question: &str) -> bool {
    false
}
