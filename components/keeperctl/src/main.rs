mod cli;

use crate::cli::{Cli, ClientConfig, Command, SecretsCommand};
use anyhow::Context;
use clap::Parser;
use keeperctl::{
    Key, RequestError,
    repo::KeeperClient,
    service::{AuthService, SecretsService, UsersService},
};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(if cli.verbose {
            "keeperctl=debug"
        } else {
            "warn"
        }))
        .with_writer(std::io::stderr)
        .init();

    let (config, command) = cli.into_parts();
    match run(config, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("{err:?}");
            match err.downcast_ref::<RequestError>() {
                Some(request_error) => eprintln!("Error: {request_error}"),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ClientConfig, command: Command) -> anyhow::Result<()> {
    let ca_certificate = config
        .ca_path
        .as_ref()
        .map(|path| {
            std::fs::read(path)
                .with_context(|| format!("Failed to read CA certificate {}.", path.display()))
        })
        .transpose()?;
    let client = KeeperClient::new(&config.address, ca_certificate.as_deref())?;
    let key = Key::derive(&config.username, config.password.expose());

    match command {
        Command::Register => {
            UsersService::new(client)
                .register(&config.username, &key)
                .await?;
            println!("User {} registered.", config.username);
            Ok(())
        }
        Command::Secrets(command) => {
            let token = AuthService::new(client.clone())
                .login(&config.username, &key)
                .await?;
            run_secrets(SecretsService::new(key, client), &token, command).await
        }
    }
}

async fn run_secrets(
    secrets: SecretsService<KeeperClient>,
    token: &str,
    command: SecretsCommand,
) -> anyhow::Result<()> {
    match command {
        SecretsCommand::List => {
            println!("ID\tNAME\tKIND\tDESCRIPTION");
            for secret in secrets.list(token).await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    secret.id, secret.name, secret.kind, secret.description
                );
            }
        }
        SecretsCommand::Pull { id } => {
            let (secret, payload) = secrets.get(token, id).await?;
            println!("ID\tNAME\tKIND\tDESCRIPTION");
            println!(
                "{}\t{}\t{}\t{}",
                secret.id, secret.name, secret.kind, secret.description
            );
            for (field, value) in payload.fields() {
                println!("{field}: {value}");
            }
        }
        SecretsCommand::Delete { id } => {
            secrets.delete(token, id).await?;
            println!("Secret {id} deleted.");
        }
        SecretsCommand::Push(command) => {
            let (args, payload) = command.into_parts();
            let id = secrets
                .push(token, &args.name, &args.description, &payload)
                .await?;
            println!("Secret {id} saved.");
        }
        SecretsCommand::Edit(command) => {
            let (id, edit) = command.into_parts();
            secrets.edit(token, id, edit).await?;
            println!("Secret {id} updated.");
        }
    }

    Ok(())
}
