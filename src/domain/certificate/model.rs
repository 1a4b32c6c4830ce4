//! Certificate domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Student;
use crate::shared::contains_ci;

/// Certificate lifecycle status. Transitions are manual; nothing moves a
/// certificate to `Expired` automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CertificateStatus {
    Pending,
    Issued,
    Revoked,
    Expired,
}

impl CertificateStatus {
    pub const ALL: [CertificateStatus; 4] = [
        Self::Pending,
        Self::Issued,
        Self::Revoked,
        Self::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Issued => "ISSUED",
            Self::Revoked => "REVOKED",
            Self::Expired => "EXPIRED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "ISSUED" => Some(Self::Issued),
            "REVOKED" => Some(Self::Revoked),
            "EXPIRED" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl Default for CertificateStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Certificate {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub student_id: String,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub file_url: Option<String>,
    pub status: CertificateStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A certificate joined with its owning student. `student` is `None` only
/// when the reference dangles (possible in the flat-file store).
#[derive(Debug, Clone)]
pub struct CertificateDetails {
    pub certificate: Certificate,
    pub student: Option<Student>,
}

impl CertificateDetails {
    /// `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        let c = &self.certificate;
        contains_ci(&c.title, needle)
            || c.description
                .as_deref()
                .is_some_and(|d| contains_ci(d, needle))
            || self
                .student
                .as_ref()
                .is_some_and(|s| contains_ci(&s.name, needle) || contains_ci(&s.nim, needle))
    }
}

/// Certificate counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub issued: u64,
    pub revoked: u64,
    pub expired: u64,
}

impl StatusCounts {
    pub fn record(&mut self, status: CertificateStatus) {
        *self.slot(status) += 1;
    }

    pub fn set(&mut self, status: CertificateStatus, count: u64) {
        *self.slot(status) = count;
    }

    pub fn get(&self, status: CertificateStatus) -> u64 {
        match status {
            CertificateStatus::Pending => self.pending,
            CertificateStatus::Issued => self.issued,
            CertificateStatus::Revoked => self.revoked,
            CertificateStatus::Expired => self.expired,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.issued + self.revoked + self.expired
    }

    fn slot(&mut self, status: CertificateStatus) -> &mut u64 {
        match status {
            CertificateStatus::Pending => &mut self.pending,
            CertificateStatus::Issued => &mut self.issued,
            CertificateStatus::Revoked => &mut self.revoked,
            CertificateStatus::Expired => &mut self.expired,
        }
    }
}

impl FromIterator<CertificateStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = CertificateStatus>>(iter: I) -> Self {
        let mut counts = Self::default();
        for status in iter {
            counts.record(status);
        }
        counts
    }
}
