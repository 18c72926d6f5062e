//! Target framework identity
//!
//! Dependency graphs name frameworks by their short alias (`net8.0`,
//! `netstandard2.0`, `net472`), while restore output names them in full
//! (`.NETCoreApp,Version=v8.0`). Both forms parse to the same `FrameworkId`.

use std::fmt;

const NET_CORE_APP: &str = ".NETCoreApp";
const NET_STANDARD: &str = ".NETStandard";
const NET_FRAMEWORK: &str = ".NETFramework";

/// Framework identifier, normalised version, and optional platform name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameworkId {
    identifier: String,
    version: String,
    platform: Option<String>,
}

impl FrameworkId {
    /// Parse a short alias or a full `Identifier,Version=vX.Y` name.
    ///
    /// Returns `None` for names that are neither.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.contains(',') {
            parse_full(name)
        } else {
            parse_short(name)
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},Version=v{}", self.identifier, self.version)?;
        if let Some(ref platform) = self.platform {
            write!(f, " ({})", platform)?;
        }
        Ok(())
    }
}

/// Split a restore target key into framework and runtime identifier.
///
/// `.NETCoreApp,Version=v8.0/win-x64` has runtime `win-x64`.
pub fn split_runtime(key: &str) -> (&str, Option<&str>) {
    match key.split_once('/') {
        Some((framework, runtime)) if !runtime.is_empty() => (framework, Some(runtime)),
        Some((framework, _)) => (framework, None),
        None => (key, None),
    }
}

/// Two framework names refer to the same framework.
///
/// Names that do not parse only match themselves.
pub fn same_framework(a: &str, b: &str) -> bool {
    match (FrameworkId::parse(a), FrameworkId::parse(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

fn canonical_identifier(identifier: &str) -> String {
    match identifier.to_ascii_lowercase().as_str() {
        ".netcoreapp" => NET_CORE_APP.to_string(),
        ".netstandard" => NET_STANDARD.to_string(),
        ".netframework" => NET_FRAMEWORK.to_string(),
        _ => identifier.to_string(),
    }
}

fn parse_full(name: &str) -> Option<FrameworkId> {
    let mut parts = name.split(',');
    let identifier = parts.next()?.trim();
    if identifier.is_empty() {
        return None;
    }
    let mut version = None;
    for part in parts {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("version") {
            let value = value.trim().trim_start_matches(&['v', 'V'][..]);
            version = Some(dotted_version(value)?);
        }
    }
    Some(FrameworkId {
        identifier: canonical_identifier(identifier),
        version: version?,
        platform: None,
    })
}

fn parse_short(name: &str) -> Option<FrameworkId> {
    let lower = name.to_ascii_lowercase();
    let (framework, platform) = match lower.split_once('-') {
        Some((framework, platform)) => (framework, platform_name(platform)),
        None => (lower.as_str(), None),
    };

    let (identifier, version) = if let Some(v) = framework.strip_prefix("netcoreapp") {
        (NET_CORE_APP, short_version(v)?)
    } else if let Some(v) = framework.strip_prefix("netstandard") {
        (NET_STANDARD, short_version(v)?)
    } else if let Some(v) = framework.strip_prefix("net") {
        let version = short_version(v)?;
        // net5.0 and later are .NET Core; dotless aliases (net48) never are
        let major: u32 = version.split('.').next()?.parse().ok()?;
        if v.contains('.') && major >= 5 {
            (NET_CORE_APP, version)
        } else {
            (NET_FRAMEWORK, version)
        }
    } else {
        return None;
    };

    Some(FrameworkId {
        identifier: identifier.to_string(),
        version,
        platform,
    })
}

/// `windows7.0` → `windows`
fn platform_name(platform: &str) -> Option<String> {
    let name = platform.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Version part of a short alias: dotted (`8.0`) or compact (`472`)
fn short_version(v: &str) -> Option<String> {
    if v.contains('.') {
        dotted_version(v)
    } else {
        compact_version(v)
    }
}

/// `8.0.0` → `8.0`, `4.7.2` → `4.7.2`, `5` → `5.0`
fn dotted_version(v: &str) -> Option<String> {
    let mut parts = v
        .split('.')
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;
    while parts.len() > 2 && parts.last() == Some(&0) {
        parts.pop();
    }
    if parts.len() == 1 {
        parts.push(0);
    }
    Some(
        parts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("."),
    )
}

/// `472` → `4.7.2`, `48` → `4.8`, `4` → `4.0`
fn compact_version(v: &str) -> Option<String> {
    if v.is_empty() || !v.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let dotted: Vec<String> = v.chars().map(|c| c.to_string()).collect();
    dotted_version(&dotted.join("."))
}
