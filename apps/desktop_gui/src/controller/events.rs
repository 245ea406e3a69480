//! UI intents, backend completions, and the side effects the reducer asks for.

use shared::{
    domain::{FormField, User, UserFields, UserId},
    protocol::{DeleteResult, MutationResult, UserListResult},
};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Mount,
    Retry,
    OpenAdd,
    OpenEdit(User),
    CloseModal,
    FieldChanged { field: FormField, value: String },
    Submit,
    RequestDelete(UserId),
    DeleteConfirmed(UserId),
    DeleteDeclined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// A request settled. `Err` holds the transport-level failure text.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    UsersLoaded(Result<UserListResult, String>),
    UserSaved {
        mode: SaveMode,
        result: Result<MutationResult, String>,
    },
    UserDeleted {
        id: UserId,
        result: Result<DeleteResult, String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Action(UiAction),
    Event(UiEvent),
}

impl From<UiAction> for Input {
    fn from(action: UiAction) -> Self {
        Self::Action(action)
    }
}

impl From<UiEvent> for Input {
    fn from(event: UiEvent) -> Self {
        Self::Event(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchUsers,
    CreateUser(UserFields),
    UpdateUser { id: UserId, fields: UserFields },
    DeleteUser(UserId),
    Notify(String),
    Confirm { prompt: String, user_id: UserId },
}

/// Blocking dialog the rendering layer must show and resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Alert(String),
    Confirm { prompt: String, user_id: UserId },
}
