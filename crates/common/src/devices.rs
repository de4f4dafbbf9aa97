//! Device emulation presets
//!
//! Named bundles of context options (user agent, viewport, scale factor,
//! touch support, default engine) that projects spread under their own
//! overrides.

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::types::{BrowserName, UseOptions, Viewport};

const CHROME_VERSION: &str = "131.0.6778.33";

static DEVICES: Lazy<Vec<(&'static str, UseOptions)>> = Lazy::new(|| {
    vec![
        ("Desktop Chrome", desktop_chrome()),
        ("Desktop Edge", desktop_edge()),
        ("Desktop Firefox", desktop_firefox()),
        ("Desktop Safari", desktop_safari()),
        ("Pixel 7", pixel_7()),
        ("iPhone 14", iphone_14()),
    ]
});

/// Look up a preset by name
pub fn get(name: &str) -> Option<UseOptions> {
    DEVICES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, opts)| opts.clone())
}

/// Look up a preset by name, failing on unknown names
pub fn lookup(name: &str) -> Result<UseOptions> {
    get(name).ok_or_else(|| Error::UnknownDevice(name.to_string()))
}

/// All preset names in registry order
pub fn names() -> Vec<&'static str> {
    DEVICES.iter().map(|(n, _)| *n).collect()
}

/// All presets in registry order
pub fn all() -> &'static [(&'static str, UseOptions)] {
    &DEVICES
}

fn desktop(user_agent: String, browser: BrowserName) -> UseOptions {
    UseOptions {
        user_agent: Some(user_agent),
        viewport: Some(Viewport {
            width: 1280,
            height: 720,
        }),
        device_scale_factor: Some(1.0),
        is_mobile: Some(false),
        has_touch: Some(false),
        default_browser_type: Some(browser),
        ..Default::default()
    }
}

/// Desktop Chromium on Windows, 1280x720
pub fn desktop_chrome() -> UseOptions {
    desktop(
        format!(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/{CHROME_VERSION} Safari/537.36"
        ),
        BrowserName::Chromium,
    )
}

pub fn desktop_edge() -> UseOptions {
    UseOptions {
        channel: Some("msedge".to_string()),
        ..desktop(
            format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/{CHROME_VERSION} Safari/537.36 Edg/{CHROME_VERSION}"
            ),
            BrowserName::Chromium,
        )
    }
}

pub fn desktop_firefox() -> UseOptions {
    desktop(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0"
            .to_string(),
        BrowserName::Firefox,
    )
}

pub fn desktop_safari() -> UseOptions {
    desktop(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/18.2 Safari/605.1.15"
            .to_string(),
        BrowserName::Webkit,
    )
}

pub fn pixel_7() -> UseOptions {
    UseOptions {
        user_agent: Some(format!(
            "Mozilla/5.0 (Linux; Android 14; Pixel 7) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/{CHROME_VERSION} Mobile Safari/537.36"
        )),
        viewport: Some(Viewport {
            width: 412,
            height: 839,
        }),
        device_scale_factor: Some(2.625),
        is_mobile: Some(true),
        has_touch: Some(true),
        default_browser_type: Some(BrowserName::Chromium),
        ..Default::default()
    }
}

pub fn iphone_14() -> UseOptions {
    UseOptions {
        user_agent: Some(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 \
             (KHTML, like Gecko) Version/18.2 Mobile/15E148 Safari/604.1"
                .to_string(),
        ),
        viewport: Some(Viewport {
            width: 390,
            height: 664,
        }),
        device_scale_factor: Some(3.0),
        is_mobile: Some(true),
        has_touch: Some(true),
        default_browser_type: Some(BrowserName::Webkit),
        ..Default::default()
    }
}
