use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Pre-release component of a version: a label and an iteration number.
///
/// Both are present together or not at all; a bare label without a number is
/// not a version-shaped tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    pub label: String,
    pub number: u32,
}

/// Semantic version representation, optionally carrying a pre-release part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre: Option<PreRelease>,
}

impl Version {
    /// Create a new release version (no pre-release part)
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Parse a tag name as a version.
    ///
    /// Tags must match `major.minor.patch` with an optional pre-release
    /// suffix of letters followed by digits, separated by an optional
    /// hyphen (e.g. "4.6.3", "4.7.0rc8", "2.0.0-rc1"). Anything else is
    /// not a version and yields `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let re = Regex::new(r"^(\d+)\.(\d+)\.(\d+)(-?([a-zA-Z]+)([0-9]+))?$").ok()?;
        let captures = re.captures(tag)?;

        let major = captures.get(1)?.as_str().parse::<u32>().ok()?;
        let minor = captures.get(2)?.as_str().parse::<u32>().ok()?;
        let patch = captures.get(3)?.as_str().parse::<u32>().ok()?;

        let pre = match (captures.get(5), captures.get(6)) {
            (Some(label), Some(number)) => Some(PreRelease {
                label: label.as_str().to_string(),
                number: number.as_str().parse::<u32>().ok()?,
            }),
            _ => None,
        };

        Some(Version {
            major,
            minor,
            patch,
            pre,
        })
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre.is_some()
    }

    /// Next major version: `X.Y.Z -> (X+1).0.0`
    pub fn bump_major(&self) -> Self {
        Version::new(self.major + 1, 0, 0)
    }

    /// Next minor version: `X.Y.Z -> X.(Y+1).0`
    pub fn bump_minor(&self) -> Self {
        Version::new(self.major, self.minor + 1, 0)
    }

    /// Next patch version: `X.Y.Z -> X.Y.(Z+1)`
    pub fn bump_patch(&self) -> Self {
        Version::new(self.major, self.minor, self.patch + 1)
    }
}

impl Ord for Version {
    /// Total ordering: the `(major, minor, patch)` triple first; a release
    /// orders above any pre-release of the same triple; pre-releases of the
    /// same label order by number.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.label.cmp(&b.label).then(a.number.cmp(&b.number)),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "{}{}", pre.label, pre.number)?;
        }
        Ok(())
    }
}
