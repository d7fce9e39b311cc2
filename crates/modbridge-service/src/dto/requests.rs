//! Request-side DTOs

/// The chat user who issued a command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invoker {
    /// Platform user id (snowflake as a string)
    pub user_id: String,
    /// Name recorded as the moderator on records and events
    pub display_name: String,
    /// Role ids held in the guild the command came from
    pub role_ids: Vec<String>,
}

impl Invoker {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            role_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.role_ids = roles.into_iter().map(Into::into).collect();
        self
    }
}
