//! Certificate aggregate

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use model::{Certificate, CertificateDetails, CertificateStatus, StatusCounts};

pub use dto_create::CreateCertificateDto;
pub use dto_get::GetCertificateDto;
pub use dto_update::UpdateCertificateDto;

pub use repository::CertificateRepository;
