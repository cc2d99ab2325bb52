use std::fmt;
use std::str::FromStr;

use crate::foundation::error::CodegenError;

/// Host operating system a generated artifact targets.
///
/// Spelled like Python's `platform.system()` so gating expressions embedded in `.ds` menus
/// compare against the same strings the host reports.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Linux distributions.
    Linux,
    /// macOS.
    Darwin,
}

impl Platform {
    /// All known platforms in a stable order.
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Linux, Platform::Darwin];

    /// Platform the generator itself runs on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Darwin
        } else {
            Platform::Linux
        }
    }

    /// Name as reported by `platform.system()`.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::Darwin => "Darwin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "darwin" | "macos" => Ok(Platform::Darwin),
            other => Err(CodegenError::validation(format!(
                "unknown platform '{other}'"
            ))),
        }
    }
}

/// Bit mask over the generated `ChangeTracker` dirty flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct DirtyMask(pub u32);

impl DirtyMask {
    /// No flag set.
    pub const CLEAN: DirtyMask = DirtyMask(0);
    /// Every flag set.
    pub const ALL: DirtyMask = DirtyMask(!0u32);

    /// Mask with only `bit` set.
    pub fn bit(bit: u32) -> Self {
        DirtyMask(1u32 << bit)
    }

    /// Return `true` when any bit of `other` is also set in `self`.
    pub fn intersects(self, other: DirtyMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Number of set bits.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl std::ops::BitOr for DirtyMask {
    type Output = DirtyMask;

    fn bitor(self, rhs: DirtyMask) -> DirtyMask {
        DirtyMask(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for DirtyMask {
    fn bitor_assign(&mut self, rhs: DirtyMask) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
