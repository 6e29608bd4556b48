use super::UserRole;

/// Insert payload. The password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub company_id: Option<String>,
}
