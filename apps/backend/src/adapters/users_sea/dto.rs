//! DTOs for users_sea adapter.

/// Everything needed to insert a user row. The hash is computed upstream.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserCreate {
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
