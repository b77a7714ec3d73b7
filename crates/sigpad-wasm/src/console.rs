//! Browser console plumbing: `log` records and panics go to devtools.

use log::LevelFilter;

/// Install the `console_log` backend once. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    let installed = install_backend();
    log::set_max_level(level);
    if installed {
        log::debug!("console logger installed");
    }
}

#[cfg(target_arch = "wasm32")]
fn install_backend() -> bool {
    console_log::init_with_level(log::Level::Trace).is_ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn install_backend() -> bool {
    false
}

/// Parse a level name (`"off"`, `"error"` … `"trace"`), defaulting to `warn`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Warn)
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

pub fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Signature pad WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" TRACE "), LevelFilter::Trace);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Warn);
    }
}
