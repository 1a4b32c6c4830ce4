use std::sync::Arc;

use crate::domain::{DomainResult, RepositoryProvider};

/// Aggregate counts for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_certificates: u64,
    pub pending_certificates: u64,
    pub issued_certificates: u64,
    pub revoked_certificates: u64,
    pub expired_certificates: u64,
}

#[derive(Clone)]
pub struct DashboardService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DashboardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn stats(&self) -> DomainResult<DashboardStats> {
        let total_students = self.repos.students().count().await?;
        let total_certificates = self.repos.certificates().count().await?;
        let by_status = self.repos.certificates().count_by_status().await?;

        Ok(DashboardStats {
            total_students,
            total_certificates,
            pending_certificates: by_status.pending,
            issued_certificates: by_status.issued,
            revoked_certificates: by_status.revoked,
            expired_certificates: by_status.expired,
        })
    }
}
