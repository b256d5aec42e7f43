use std::fmt;
use std::str::FromStr;

/// Error returned when a mode or unit string cannot be parsed.
//
// // 解析模式或单位字符串失败时返回的错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeParseError {
    /// Unrecognized filter mode.
    //
    // // 无法识别的筛选模式。
    #[error("Invalid filter mode '{0}': expected 'any' (0) or 'all' (1)")]
    FilterMode(String),

    /// Unrecognized tag mode.
    //
    // // 无法识别的标签模式。
    #[error("Invalid tag mode '{0}': expected 'add' (0) or 'remove' (1)")]
    TagMode(String),

    /// Unrecognized or non-integer file size unit.
    //
    // // 无法识别或非整数的文件大小单位。
    #[error("Invalid file size unit '{0}': expected 0-4 or byte/kilobyte/megabyte/gigabyte/terabyte")]
    FileSizeUnit(String),
}

/// How a tag query is matched against a record's tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// At least one queried tag is present.
    Any,
    /// Every queried tag is present.
    All,
}

impl FromStr for FilterMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "any" => Ok(FilterMode::Any),
            "1" | "all" => Ok(FilterMode::All),
            _ => Err(ModeParseError::FilterMode(s.to_string())),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Any => f.write_str("any"),
            FilterMode::All => f.write_str("all"),
        }
    }
}

/// Whether a tag operation adds to or removes from a tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagMode {
    Add,
    Remove,
}

impl FromStr for TagMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "add" => Ok(TagMode::Add),
            "1" | "remove" => Ok(TagMode::Remove),
            _ => Err(ModeParseError::TagMode(s.to_string())),
        }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagMode::Add => f.write_str("add"),
            TagMode::Remove => f.write_str("remove"),
        }
    }
}

/// Units used when presenting a cached byte size.
///
/// Each unit is `1024^exponent` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileSizeUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl FileSizeUnit {
    pub const ALL: [FileSizeUnit; 5] = [
        FileSizeUnit::Byte,
        FileSizeUnit::Kilobyte,
        FileSizeUnit::Megabyte,
        FileSizeUnit::Gigabyte,
        FileSizeUnit::Terabyte,
    ];

    /// Power of 1024 this unit represents.
    pub fn exponent(self) -> u32 {
        match self {
            FileSizeUnit::Byte => 0,
            FileSizeUnit::Kilobyte => 1,
            FileSizeUnit::Megabyte => 2,
            FileSizeUnit::Gigabyte => 3,
            FileSizeUnit::Terabyte => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileSizeUnit::Byte => "Byte",
            FileSizeUnit::Kilobyte => "Kilobyte",
            FileSizeUnit::Megabyte => "Megabyte",
            FileSizeUnit::Gigabyte => "Gigabyte",
            FileSizeUnit::Terabyte => "Terabyte",
        }
    }

    /// Converts a byte count into this unit.
    pub fn scale(self, bytes: u64) -> f64 {
        bytes as f64 / 1024f64.powi(self.exponent() as i32)
    }
}

impl TryFrom<u32> for FileSizeUnit {
    type Error = ModeParseError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        FileSizeUnit::ALL
            .into_iter()
            .find(|unit| unit.exponent() == value)
            .ok_or_else(|| ModeParseError::FileSizeUnit(value.to_string()))
    }
}

impl FromStr for FileSizeUnit {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u32>() {
            return FileSizeUnit::try_from(code);
        }
        FileSizeUnit::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModeParseError::FileSizeUnit(s.to_string()))
    }
}

impl fmt::Display for FileSizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
