use serde::{Deserialize, Serialize};

pub const DESKTOP_PREAMBLE: &str = "#version 410 core\n";
pub const ANDROID_PREAMBLE: &str = "#version 300 es\nprecision highp float;\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    Desktop,
    Android,
}

impl TargetPlatform {
    /// The platform this crate was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            TargetPlatform::Android
        } else {
            TargetPlatform::Desktop
        }
    }

    pub fn preamble(self) -> &'static str {
        match self {
            TargetPlatform::Desktop => DESKTOP_PREAMBLE,
            TargetPlatform::Android => ANDROID_PREAMBLE,
        }
    }
}

impl Default for TargetPlatform {
    fn default() -> Self {
        Self::current()
    }
}

/// Version/precision header placed ahead of every shader source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble(String);

impl Preamble {
    pub fn for_platform(platform: TargetPlatform) -> Self {
        Self(platform.preamble().to_string())
    }

    /// A custom header. A trailing newline is added when missing so the
    /// first source line never lands on the directive line.
    pub fn custom<S: Into<String>>(text: S) -> Self {
        let mut text = text.into();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Preamble {
    fn default() -> Self {
        Self::for_platform(TargetPlatform::current())
    }
}
