use super::*;
use async_trait::async_trait;
use client_core::RequestError;
use crossbeam_channel::bounded;
use shared::{
    domain::{UserFields, UserId},
    protocol::{ApiResult, DeleteResult, MutationResult, UserListResult, UserResult},
};
use std::time::Duration;

/// Every call fails at the transport level with the operation name.
struct UnreachableApi;

fn unreachable(op: &str) -> RequestError {
    RequestError::Status {
        status: 502,
        message: format!("{op} unreachable"),
    }
}

#[async_trait]
impl UserApi for UnreachableApi {
    async fn list_users(&self) -> Result<UserListResult, RequestError> {
        Err(unreachable("list"))
    }

    async fn get_user(&self, _id: &UserId) -> Result<UserResult, RequestError> {
        Err(unreachable("get"))
    }

    async fn create_user(&self, _fields: &UserFields) -> Result<MutationResult, RequestError> {
        Err(unreachable("create"))
    }

    async fn update_user(
        &self,
        _id: &UserId,
        _fields: &UserFields,
    ) -> Result<MutationResult, RequestError> {
        Err(unreachable("update"))
    }

    async fn delete_user(&self, _id: &UserId) -> Result<DeleteResult, RequestError> {
        Ok(ApiResult::failure("still referenced"))
    }
}

#[tokio::test]
async fn execute_command_maps_each_command_to_its_completion() {
    let api = UnreachableApi;

    assert_eq!(
        execute_command(&api, BackendCommand::ListUsers).await,
        UiEvent::UsersLoaded(Err("list unreachable".into()))
    );
    assert_eq!(
        execute_command(
            &api,
            BackendCommand::UpdateUser {
                id: UserId::Int(7),
                fields: UserFields::new("New", "o@x.com", "1"),
            }
        )
        .await,
        UiEvent::UserSaved {
            mode: SaveMode::Update,
            result: Err("update unreachable".into()),
        }
    );
    assert_eq!(
        execute_command(&api, BackendCommand::DeleteUser { id: UserId::Int(3) }).await,
        UiEvent::UserDeleted {
            id: UserId::Int(3),
            result: Ok(ApiResult::failure("still referenced")),
        }
    );
}

#[test]
fn worker_processes_commands_in_order_and_wakes_ui() {
    let (cmd_tx, cmd_rx) = bounded(4);
    let (ui_tx, ui_rx) = bounded(4);
    let (wake_tx, wake_rx) = bounded(4);

    let worker = spawn_backend_thread(Arc::new(UnreachableApi), cmd_rx, ui_tx, move || {
        let _ = wake_tx.try_send(());
    })
    .expect("spawn worker");

    cmd_tx
        .send(BackendCommand::CreateUser {
            fields: UserFields::new("Ana Ruiz", "ana@x.com", "555-1111"),
        })
        .expect("queue create");
    cmd_tx.send(BackendCommand::ListUsers).expect("queue list");

    let first = ui_rx.recv_timeout(Duration::from_secs(5)).expect("first event");
    let second = ui_rx.recv_timeout(Duration::from_secs(5)).expect("second event");
    assert!(matches!(
        first,
        UiEvent::UserSaved {
            mode: SaveMode::Create,
            ..
        }
    ));
    assert!(matches!(second, UiEvent::UsersLoaded(Err(_))));
    assert!(wake_rx.recv_timeout(Duration::from_secs(5)).is_ok());

    drop(cmd_tx);
    worker.join().expect("worker exits when queue closes");
}
