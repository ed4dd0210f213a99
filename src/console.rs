//! Console logging
//!
//! Messages go to the browser console on `wasm32` and to stderr elsewhere,
//! so native unit tests never call into JS imports.

macro_rules! console_log {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&message));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("{}", message);
        }
    }};
}

macro_rules! console_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&message));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("warn: {}", message);
        }
    }};
}

macro_rules! console_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&message));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("error: {}", message);
        }
    }};
}

pub(crate) use console_error;
pub(crate) use console_log;
pub(crate) use console_warn;
