//! Backend commands queued from UI to backend worker.

use shared::domain::{UserFields, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    ListUsers,
    CreateUser { fields: UserFields },
    UpdateUser { id: UserId, fields: UserFields },
    DeleteUser { id: UserId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListUsers => "list_users",
            Self::CreateUser { .. } => "create_user",
            Self::UpdateUser { .. } => "update_user",
            Self::DeleteUser { .. } => "delete_user",
        }
    }
}
