//! Device detection used to pick a default QR size.

use regex::Regex;
use std::sync::LazyLock;

use super::size::TargetSize;

static RE_MOBILE_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini").unwrap()
});

/// Viewport width at or below which a touch device counts as mobile.
pub const MOBILE_MAX_VIEWPORT: u32 = 768;

/// What the front end knows about the device it runs on.
#[derive(Debug, Clone, Default)]
pub struct DeviceHints {
    pub user_agent: String,
    pub viewport_width: Option<u32>,
    pub touch_points: u32,
}

impl DeviceHints {
    /// Mobile if the user agent says so, or the screen is small and
    /// touch-capable.
    pub fn is_mobile(&self) -> bool {
        let ua_mobile = RE_MOBILE_UA.is_match(&self.user_agent);
        let small_screen = self
            .viewport_width
            .is_some_and(|w| w <= MOBILE_MAX_VIEWPORT);
        let touch = self.touch_points > 0;
        ua_mobile || (small_screen && touch)
    }
}

/// Device class, either forced by configuration or detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceProfile {
    #[default]
    Auto,
    Mobile,
    Desktop,
}

impl DeviceProfile {
    /// Resolve `Auto` against the given hints.
    pub fn resolve(self, hints: &DeviceHints) -> DeviceProfile {
        match self {
            DeviceProfile::Auto if hints.is_mobile() => DeviceProfile::Mobile,
            DeviceProfile::Auto => DeviceProfile::Desktop,
            other => other,
        }
    }

    pub fn default_size(self) -> TargetSize {
        match self {
            DeviceProfile::Mobile => TargetSize::MOBILE,
            DeviceProfile::Desktop | DeviceProfile::Auto => TargetSize::DESKTOP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints(ua: &str, width: Option<u32>, touch: u32) -> DeviceHints {
        DeviceHints {
            user_agent: ua.into(),
            viewport_width: width,
            touch_points: touch,
        }
    }

    #[test]
    fn mobile_user_agents() {
        let cases = vec![
            ("Mozilla/5.0 (Linux; Android 14; Pixel 8)", true),
            ("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)", true),
            ("Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)", true),
            ("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)", true),
            ("mozilla/5.0 (linux; android 10)", true),
            ("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", false),
            ("Mozilla/5.0 (X11; Linux x86_64)", false),
        ];
        for (ua, expected) in cases {
            assert_eq!(
                hints(ua, Some(1920), 0).is_mobile(),
                expected,
                "UA '{ua}' should{} be mobile",
                if expected { "" } else { " not" }
            );
        }
    }

    #[test]
    fn small_touch_screen_is_mobile() {
        assert!(hints("", Some(768), 1).is_mobile());
        assert!(!hints("", Some(769), 5).is_mobile());
        assert!(!hints("", Some(400), 0).is_mobile());
        assert!(!hints("", None, 5).is_mobile());
    }

    #[test]
    fn profile_resolution_and_sizes() {
        let phone = hints("iPhone", None, 0);
        let desk = hints("Windows", Some(1920), 0);
        assert_eq!(DeviceProfile::Auto.resolve(&phone), DeviceProfile::Mobile);
        assert_eq!(DeviceProfile::Auto.resolve(&desk), DeviceProfile::Desktop);
        assert_eq!(DeviceProfile::Desktop.resolve(&phone), DeviceProfile::Desktop);
        assert_eq!(DeviceProfile::Mobile.default_size().get(), 256);
        assert_eq!(DeviceProfile::Desktop.default_size().get(), 512);
    }
}
