//! Single owned view state for the user list page.

use shared::domain::{User, UserFields};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Server order, replaced wholesale on every successful load.
    pub users: Vec<User>,
    /// True while a request is in flight; gates every user intent.
    pub loading: bool,
    /// Only the list load writes this.
    pub error: Option<String>,
    pub is_modal_open: bool,
    pub is_editing: bool,
    pub current_user: Option<User>,
    pub form_data: UserFields,
}

impl ViewState {
    pub(crate) fn open_modal(&mut self, editing: Option<User>) {
        self.form_data = editing.as_ref().map(UserFields::from).unwrap_or_default();
        self.is_editing = editing.is_some();
        self.current_user = editing;
        self.is_modal_open = true;
    }

    pub(crate) fn close_modal(&mut self) {
        self.is_modal_open = false;
        self.is_editing = false;
        self.current_user = None;
        self.form_data = UserFields::default();
    }

    pub(crate) fn begin_request(&mut self) {
        self.loading = true;
    }

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }
}
