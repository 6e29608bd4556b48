#[derive(Debug, Clone)]
pub struct CreateCompanyDto {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCompanyDto {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetCompanyDto {
    /// Substring match on the company name
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}
