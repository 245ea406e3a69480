use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client_core::{load_settings, UserApi, UserApiClient};
use serde::Serialize;
use shared::{
    domain::{UserFields, UserId},
    protocol::ApiResult,
};
use tracing_subscriber::EnvFilter;

/// Command-line access to the user-management service.
#[derive(Parser, Debug)]
#[command(name = "sgu")]
struct Args {
    /// Overrides the configured API host.
    #[arg(long, global = true)]
    api_host: Option<String>,
    /// Overrides the configured API port.
    #[arg(long, global = true)]
    api_port: Option<u16>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every user in server order.
    List,
    /// Show one user.
    Get { id: String },
    /// Create a user.
    Create(FieldArgs),
    /// Replace a user's editable fields.
    Update {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a user.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct FieldArgs {
    #[arg(long)]
    fullname: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
}

impl From<FieldArgs> for UserFields {
    fn from(args: FieldArgs) -> Self {
        UserFields::new(args.fullname, args.email, args.phone)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(host) = args.api_host {
        settings.api_host = host;
    }
    if let Some(port) = args.api_port {
        settings.api_port = port;
    }
    let client = UserApiClient::from_settings(&settings).context("invalid API settings")?;
    tracing::debug!(base_url = client.base_url(), "using user service");

    run(&client, args.command).await
}

async fn run(api: &dyn UserApi, command: Command) -> Result<()> {
    match command {
        Command::List => print_result(api.list_users().await.context("Error al cargar usuarios")?),
        Command::Get { id } => print_result(
            api.get_user(&UserId::from(id))
                .await
                .context("Error al obtener usuario")?,
        ),
        Command::Create(fields) => {
            let fields = validated(fields.into())?;
            print_result(api.create_user(&fields).await.context("Error al crear usuario")?)
        }
        Command::Update { id, fields } => {
            let fields = validated(fields.into())?;
            print_result(
                api.update_user(&UserId::from(id), &fields)
                    .await
                    .context("Error al actualizar usuario")?,
            )
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm("¿Estás seguro de que quieres eliminar este usuario?")? {
                eprintln!("cancelled");
                return Ok(());
            }
            print_result(
                api.delete_user(&UserId::from(id))
                    .await
                    .context("Error al eliminar usuario")?,
            )
        }
    }
}

fn validated(fields: UserFields) -> Result<UserFields> {
    if !fields.is_complete() {
        bail!("Todos los campos son obligatorios");
    }
    Ok(fields)
}

/// Prints the envelope; `success:false` becomes a non-zero exit.
fn print_result<T: Serialize>(result: ApiResult<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.success {
        bail!(
            "Error: {}",
            result.message.as_deref().unwrap_or("request failed")
        );
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [s/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    ))
}
