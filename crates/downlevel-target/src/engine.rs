//! Engines and their version space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A runtime or browser family a build can target.
///
/// The set is closed. `Es` is the generic ECMAScript generation marker: it
/// constrains script features only and its versions are edition years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Chrome,
    Edge,
    Firefox,
    Safari,
    /// Safari on iOS
    Ios,
    Opera,
    Node,
    Deno,
    /// ECMAScript generation (`es2015`, `esnext`)
    Es,
}

impl Engine {
    pub const ALL: [Engine; 9] = [
        Engine::Chrome,
        Engine::Edge,
        Engine::Firefox,
        Engine::Safari,
        Engine::Ios,
        Engine::Opera,
        Engine::Node,
        Engine::Deno,
        Engine::Es,
    ];

    /// Canonical token prefix.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Engine::Chrome => "chrome",
            Engine::Edge => "edge",
            Engine::Firefox => "firefox",
            Engine::Safari => "safari",
            Engine::Ios => "ios",
            Engine::Opera => "opera",
            Engine::Node => "node",
            Engine::Deno => "deno",
            Engine::Es => "es",
        }
    }

    /// Look up a token prefix, case-insensitively.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "chrome" => Some(Engine::Chrome),
            "edge" => Some(Engine::Edge),
            "firefox" => Some(Engine::Firefox),
            "safari" => Some(Engine::Safari),
            "ios" | "ios_saf" => Some(Engine::Ios),
            "opera" => Some(Engine::Opera),
            "node" => Some(Engine::Node),
            "deno" => Some(Engine::Deno),
            "es" => Some(Engine::Es),
            _ => None,
        }
    }

    /// Browsers render stylesheets; runtimes and the ECMAScript marker do not.
    pub const fn is_browser(&self) -> bool {
        matches!(
            self,
            Engine::Chrome
                | Engine::Edge
                | Engine::Firefox
                | Engine::Safari
                | Engine::Ios
                | Engine::Opera
        )
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `major.minor.patch` version, ordered lexicographically.
///
/// ECMAScript generations use the edition year as `major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Greater than every real version; `esnext` resolves to this.
    pub const LATEST: Version = Version::new(u32::MAX, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn major(major: u32) -> Self {
        Self::new(major, 0, 0)
    }

    pub const fn is_latest(&self) -> bool {
        self.major == u32::MAX
    }
}

impl FromStr for Version {
    type Err = String;

    /// Parse `16`, `18.4` or `18.12.1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0u32; 3];
        let mut count = 0;
        for piece in s.split('.') {
            if count == parts.len() {
                return Err(format!("too many components in version `{}`", s));
            }
            if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("`{}` is not a numeric version", s));
            }
            parts[count] = piece
                .parse()
                .map_err(|_| format!("version component `{}` is out of range", piece))?;
            count += 1;
        }
        Ok(Version::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.minor, self.patch) {
            (0, 0) => write!(f, "{}", self.major),
            (minor, 0) => write!(f, "{}.{}", self.major, minor),
            (minor, patch) => write!(f, "{}.{}.{}", self.major, minor, patch),
        }
    }
}
