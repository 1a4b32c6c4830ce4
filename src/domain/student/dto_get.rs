#[derive(Debug, Clone, Default)]
pub struct GetStudentDto {
    /// Case-insensitive substring over name, NIM and major.
    pub search: Option<String>,
}
