//! Backend worker: owns the tokio runtime and executes queued commands in order.

use std::{sync::Arc, thread};

use client_core::UserApi;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{SaveMode, UiEvent};

/// Runs one command against the service and reports how it settled.
pub async fn execute_command(api: &dyn UserApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::ListUsers => {
            UiEvent::UsersLoaded(api.list_users().await.map_err(|err| err.to_string()))
        }
        BackendCommand::CreateUser { fields } => UiEvent::UserSaved {
            mode: SaveMode::Create,
            result: api.create_user(&fields).await.map_err(|err| err.to_string()),
        },
        BackendCommand::UpdateUser { id, fields } => UiEvent::UserSaved {
            mode: SaveMode::Update,
            result: api
                .update_user(&id, &fields)
                .await
                .map_err(|err| err.to_string()),
        },
        BackendCommand::DeleteUser { id } => {
            let result = api.delete_user(&id).await.map_err(|err| err.to_string());
            UiEvent::UserDeleted { id, result }
        }
    }
}

/// Spawns the worker thread. `wake` is called after every completion so the
/// UI can repaint without polling.
pub fn spawn_backend_thread(
    api: Arc<dyn UserApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    wake: impl Fn() + Send + 'static,
) -> anyhow::Result<thread::JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .map_err(|err| anyhow::anyhow!("failed to build backend runtime: {err}"))?;

    let handle = thread::Builder::new()
        .name("user-api-worker".to_string())
        .spawn(move || {
            tracing::info!("backend worker started");
            runtime.block_on(async move {
                while let Ok(cmd) = cmd_rx.recv() {
                    let name = cmd.name();
                    let event = execute_command(api.as_ref(), cmd).await;
                    tracing::debug!(command = name, "backend command settled");
                    if ui_tx.send(event).is_err() {
                        tracing::warn!("ui event receiver dropped; stopping backend worker");
                        break;
                    }
                    wake();
                }
            });
            tracing::info!("backend worker stopped");
        })?;
    Ok(handle)
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
