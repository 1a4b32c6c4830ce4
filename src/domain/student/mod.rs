//! Student aggregate: certificate recipients

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use model::Student;

pub use dto_create::CreateStudentDto;
pub use dto_get::GetStudentDto;
pub use dto_update::UpdateStudentDto;

pub use repository::StudentRepository;
