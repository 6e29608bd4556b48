#[derive(Debug, Clone, Default)]
pub struct GetUserDto {
    /// Restrict the listing to one company
    pub company_id: Option<String>,
    /// Search by name or email
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// `name`, `email`; anything else sorts newest first
    pub sort_by: Option<String>,
}
