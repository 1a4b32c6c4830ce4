//! Domain layer: entities, DTOs and the repository contracts every
//! storage backend implements.

pub mod certificate;
pub mod repositories;
pub mod student;
pub mod user;

pub use certificate::{
    Certificate, CertificateDetails, CertificateRepository, CertificateStatus,
    CreateCertificateDto, GetCertificateDto, StatusCounts, UpdateCertificateDto,
};
pub use repositories::RepositoryProvider;
pub use student::{
    CreateStudentDto, GetStudentDto, Student, StudentRepository, UpdateStudentDto,
};
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepository, UserRole};

// Re-export the error types for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
