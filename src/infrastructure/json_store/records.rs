//! On-disk record shapes (camelCase, one array per file)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Certificate, CertificateStatus, Student, User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    /// bcrypt digest
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        User {
            id: r.id,
            username: r.username,
            password_hash: r.password,
            name: r.name,
            role: r.role,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub nim: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub major: String,
    pub enrollment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRecord> for Student {
    fn from(r: StudentRecord) -> Self {
        Student {
            id: r.id,
            nim: r.nim,
            name: r.name,
            email: r.email,
            phone: r.phone,
            address: r.address,
            date_of_birth: r.date_of_birth,
            year: r.year,
            major: r.major,
            enrollment_date: r.enrollment_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub student_id: String,
    pub issue_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub status: CertificateStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CertificateRecord> for Certificate {
    fn from(r: CertificateRecord) -> Self {
        Certificate {
            id: r.id,
            title: r.title,
            description: r.description,
            student_id: r.student_id,
            issue_date: r.issue_date,
            expiry_date: r.expiry_date,
            file_url: r.file_url,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
