// ── Provider contract ──
//
// A provider reads the current instances of one resource type from the
// switch and converges a desired resource onto it. Every `apply` re-reads
// the device first; nothing is cached between calls.

use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;

/// Whether a resource should exist on the switch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

/// One resource type backed by a set of `EosClient` operations.
pub trait Provider {
    type Resource: Send + Sync;

    /// Resource type name used in reports and errors.
    const KIND: &'static str;

    /// Current instances, read fresh from the device.
    fn instances(&self) -> impl Future<Output = Result<Vec<Self::Resource>, CoreError>> + Send;

    /// Converge `desired` onto the device. `None` properties are left alone.
    fn apply(
        &self,
        desired: &Self::Resource,
    ) -> impl Future<Output = Result<ApplyReport, CoreError>> + Send;
}

// ── Reports ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    Created,
    Destroyed,
    Set {
        property: String,
        from: Option<String>,
        to: String,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::Destroyed => f.write_str("destroyed"),
            Self::Set {
                property,
                from: Some(from),
                to,
            } => write!(f, "{property}: '{from}' -> '{to}'"),
            Self::Set {
                property,
                from: None,
                to,
            } => write!(f, "{property}: '{to}'"),
        }
    }
}

/// What one `apply` call changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub kind: &'static str,
    pub name: String,
    pub changes: Vec<Change>,
}

impl ApplyReport {
    pub fn new(kind: &'static str, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            changes: Vec::new(),
        }
    }

    /// `true` when the device already matched.
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }

    pub(crate) fn created(&mut self) {
        self.changes.push(Change::Created);
    }

    pub(crate) fn destroyed(&mut self) {
        self.changes.push(Change::Destroyed);
    }

    pub(crate) fn set<F, T>(&mut self, property: &str, from: Option<&F>, to: &T)
    where
        F: fmt::Display + ?Sized,
        T: fmt::Display + ?Sized,
    {
        self.changes.push(Change::Set {
            property: property.into(),
            from: from.map(ToString::to_string),
            to: to.to_string(),
        });
    }

    /// Record `property` when a managed value differs from the device.
    pub(crate) fn diff<T>(&mut self, property: &str, from: Option<&T>, to: Option<&T>)
    where
        T: fmt::Display + PartialEq + ?Sized,
    {
        if let Some(to) = to {
            if from != Some(to) {
                self.set(property, from, to);
            }
        }
    }
}

// ── Diff helpers ────────────────────────────────────────────────────

/// The desired value when it is managed and differs from `current`.
pub(crate) fn drift<'a, T: PartialEq + ?Sized>(
    desired: Option<&'a T>,
    current: Option<&T>,
) -> Option<&'a T> {
    match desired {
        Some(want) if current != Some(want) => Some(want),
        _ => None,
    }
}

/// Fail with `Unsupported` when an unsupported property is managed.
pub(crate) fn reject_unsupported<T>(
    kind: &str,
    property: &str,
    value: Option<&T>,
) -> Result<(), CoreError> {
    match value {
        Some(_) => Err(CoreError::unsupported(kind, property)),
        None => Ok(()),
    }
}

/// Render a list for reports: `a, b, c`.
pub(crate) fn list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_ignores_unmanaged_and_equal() {
        assert_eq!(drift::<u32>(None, Some(&1)), None);
        assert_eq!(drift(Some(&1), Some(&1)), None);
        assert_eq!(drift(Some(&2), Some(&1)), Some(&2));
        assert_eq!(drift(Some("web"), None), Some("web"));
    }

    #[test]
    fn change_display() {
        let mut report = ApplyReport::new("vlan", "10");
        assert!(report.is_noop());
        report.set("vlan_name", Some("old"), "new");
        report.set::<str, _>("shutdown", None, &true);
        assert_eq!(report.changes[0].to_string(), "vlan_name: 'old' -> 'new'");
        assert_eq!(report.changes[1].to_string(), "shutdown: 'true'");
        assert_eq!("absent".parse::<Ensure>().ok(), Some(Ensure::Absent));
    }
}
