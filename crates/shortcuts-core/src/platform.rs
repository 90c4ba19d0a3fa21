// Shortcuts Platform Descriptor
// Host platform name and the platform-dependent `mod` alias

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::modifier::Modifier;

fn apple_pattern() -> &'static Regex {
    static APPLE: OnceLock<Regex> = OnceLock::new();
    APPLE.get_or_init(|| Regex::new("Mac|iPod|iPhone|iPad").expect("static pattern is valid"))
}

/// The host platform, identified by a navigator-style name such as
/// `"MacIntel"`, `"Win32"` or `"Linux x86_64"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    name: String,
    apple: bool,
}

impl Platform {
    /// Wrap a platform name. Apple detection happens once, here.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let apple = apple_pattern().is_match(&name);
        Self { name, apple }
    }

    /// Describe the platform this binary was compiled for
    pub fn host() -> Self {
        let name = match std::env::consts::OS {
            "macos" => "MacIntel",
            "ios" => "iPhone",
            "windows" => "Win32",
            other => other,
        };
        Self::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for macOS and iOS devices
    pub fn is_apple(&self) -> bool {
        self.apple
    }

    /// The modifier `mod` stands for: Meta (Cmd) on Apple platforms, Ctrl elsewhere
    pub fn mod_key(&self) -> Modifier {
        if self.apple {
            Modifier::Meta
        } else {
            Modifier::Ctrl
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
