use wasm_bindgen::{JsCast, JsValue};

pub fn format_time(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{:01}:{:02}:{:02}", h, m, s)
    } else if m > 0 {
        format!("{:02}:{:02}", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Monotonic page clock in ms. Every engine action is stamped with it so
/// frames, timers and key presses share one time base.
pub fn now_ms() -> f64 {
    web_sys::window().and_then(|w| w.performance()).map_or_else(js_sys::Date::now, |p| p.now())
}

/// Best effort text for a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = web_sys::window() else {
        return (1280.0, 720.0);
    };
    let read = |v: Result<JsValue, JsValue>, fallback: f64| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
    (read(win.inner_width(), 1280.0), read(win.inner_height(), 720.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_times_are_seconds() {
        assert_eq!(format_time(0), "0s");
        assert_eq!(format_time(59), "59s");
    }

    #[test]
    fn longer_times_are_clock_style() {
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(3725), "1:02:05");
    }
}
