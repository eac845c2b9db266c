//! Snapshot format version.
//!
//! Minor 1 writes non-finite statistics as strings instead of `null`.

use core::fmt;

use crate::SCHEMA_VERSION;

/// Minor revision of the snapshot format written by this library.
pub const SCHEMA_MINOR: u32 = 1;

/// Format version stamped on every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaVersion {
    pub major: u32,
    /// Additive revisions within a major version.
    pub minor: u32,
}

impl SchemaVersion {
    /// The format this library writes.
    pub const fn current() -> Self {
        Self {
            major: SCHEMA_VERSION,
            minor: SCHEMA_MINOR,
        }
    }

    /// Whether a reader at this version can load a snapshot written at `written`.
    ///
    /// Readers ignore fields they do not know, so only the major version has
    /// to agree.
    pub fn reads(&self, written: &SchemaVersion) -> bool {
        self.major == written.major
    }

    /// Shorthand for `SchemaVersion::current().reads(self)`.
    pub fn is_compatible(&self) -> bool {
        Self::current().reads(self)
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_reads_itself() {
        let current = SchemaVersion::current();
        assert!(current.is_compatible());
        assert_eq!(current.to_string(), "1.1");
        assert_eq!(SchemaVersion::default(), current);
    }

    #[test]
    fn older_minor_is_readable() {
        let first = SchemaVersion {
            major: SCHEMA_VERSION,
            minor: 0,
        };
        assert!(SchemaVersion::current().reads(&first));
        assert!(first.reads(&SchemaVersion::current()));
    }

    #[test]
    fn other_major_is_not() {
        let next = SchemaVersion {
            major: SCHEMA_VERSION + 1,
            minor: 0,
        };
        assert!(!next.is_compatible());
        assert!(!SchemaVersion::current().reads(&next));
    }
}
