use clap::{Args, Parser, Subcommand};
use keeperctl::{
    SecretPayload,
    payload::{Binary, Card, Credentials, Text},
    service::{PayloadPatch, SecretEdit},
};
use std::{
    convert::Infallible,
    fmt::{Debug, Formatter},
    path::PathBuf,
    str::FromStr,
};
use uuid::Uuid;

/// Command line client for keeper: secrets are encrypted before they leave the machine.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address of the keeperd service.
    #[arg(long, env = "KEEPER_ADDRESS", default_value = "https://127.0.0.1:9090")]
    pub address: String,
    /// Path to the certificate authority to verify the server certificate with.
    #[arg(long, env = "KEEPER_CA_PATH")]
    pub ca_path: Option<PathBuf>,
    /// Name of the user.
    #[arg(short, long, env = "KEEPER_USERNAME")]
    pub username: String,
    /// Master password, never leaves the machine.
    #[arg(short, long, env = "KEEPER_PASSWORD", hide_env_values = true)]
    pub password: Password,
    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by all commands.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub address: String,
    pub ca_path: Option<PathBuf>,
    pub username: String,
    pub password: Password,
}

impl Cli {
    pub fn into_parts(self) -> (ClientConfig, Command) {
        (
            ClientConfig {
                address: self.address,
                ca_path: self.ca_path,
                username: self.username,
                password: self.password,
            },
            self.command,
        )
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl FromStr for Password {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self(value.to_string()))
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("****")
    }
}

/// Bytes passed as a hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexData(pub Vec<u8>);

impl FromStr for HexData {
    type Err = hex::FromHexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        hex::decode(value).map(Self)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new user.
    Register,
    #[command(flatten)]
    Secrets(SecretsCommand),
}

/// Commands that require the user to be logged in.
#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// List secrets of the user (without data).
    List,
    /// Show the secret and its data.
    Pull {
        /// Id of the secret.
        id: Uuid,
    },
    /// Delete the secret.
    Delete {
        /// Id of the secret.
        id: Uuid,
    },
    /// Save a new secret.
    #[command(subcommand)]
    Push(PushCommand),
    /// Edit a stored secret.
    #[command(subcommand)]
    Edit(EditCommand),
}

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Name of the secret.
    #[arg(short, long)]
    pub name: String,
    /// Additional description of the secret (activation codes, names of banks etc).
    #[arg(short, long, default_value = "")]
    pub description: String,
}

#[derive(Subcommand, Debug)]
pub enum PushCommand {
    /// Save arbitrary binary data.
    Bin {
        #[command(flatten)]
        args: PushArgs,
        /// Binary data in hex format.
        #[arg(short = 'b', long)]
        data: HexData,
    },
    /// Save bank card details.
    Card {
        #[command(flatten)]
        args: PushArgs,
        /// Card number.
        #[arg(long)]
        number: String,
        /// Card expiration date.
        #[arg(long)]
        expiration: String,
        /// Card holder name and surname.
        #[arg(long)]
        holder: String,
        /// Card verification value.
        #[arg(long)]
        cvv: u32,
    },
    /// Save login and password.
    Creds {
        #[command(flatten)]
        args: PushArgs,
        /// Login or username to save.
        #[arg(short, long)]
        login: String,
        /// Password to save.
        #[arg(short, long)]
        password: String,
    },
    /// Save arbitrary text.
    Text {
        #[command(flatten)]
        args: PushArgs,
        /// Text to save.
        #[arg(short, long)]
        text: String,
    },
}

impl PushCommand {
    pub fn into_parts(self) -> (PushArgs, SecretPayload) {
        match self {
            PushCommand::Bin { args, data } => {
                (args, SecretPayload::Binary(Binary { data: data.0 }))
            }
            PushCommand::Card {
                args,
                number,
                expiration,
                holder,
                cvv,
            } => (
                args,
                SecretPayload::Card(Card {
                    number,
                    expiration,
                    holder,
                    cvv,
                }),
            ),
            PushCommand::Creds {
                args,
                login,
                password,
            } => (
                args,
                SecretPayload::Credentials(Credentials { login, password }),
            ),
            PushCommand::Text { args, text } => (args, SecretPayload::Text(Text { text })),
        }
    }
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Id of the secret.
    pub id: Uuid,
    /// New name of the secret.
    #[arg(short, long)]
    pub name: Option<String>,
    /// New description of the secret.
    #[arg(short, long, conflicts_with = "no_description")]
    pub description: Option<String>,
    /// Remove the description of the secret.
    #[arg(long)]
    pub no_description: bool,
}

#[derive(Subcommand, Debug)]
pub enum EditCommand {
    /// Edit binary data.
    Bin {
        #[command(flatten)]
        args: EditArgs,
        /// New binary data in hex format.
        #[arg(short = 'b', long)]
        data: Option<HexData>,
    },
    /// Edit bank card details.
    Card {
        #[command(flatten)]
        args: EditArgs,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        expiration: Option<String>,
        #[arg(long)]
        holder: Option<String>,
        #[arg(long)]
        cvv: Option<u32>,
    },
    /// Edit login and password.
    Creds {
        #[command(flatten)]
        args: EditArgs,
        #[arg(short, long)]
        login: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Edit text.
    Text {
        #[command(flatten)]
        args: EditArgs,
        #[arg(short, long)]
        text: Option<String>,
    },
}

impl EditCommand {
    pub fn into_parts(self) -> (Uuid, SecretEdit) {
        let (args, payload) = match self {
            EditCommand::Bin { args, data } => (
                args,
                PayloadPatch::Binary {
                    data: data.map(|data| data.0),
                },
            ),
            EditCommand::Card {
                args,
                number,
                expiration,
                holder,
                cvv,
            } => (
                args,
                PayloadPatch::Card {
                    number,
                    expiration,
                    holder,
                    cvv,
                },
            ),
            EditCommand::Creds {
                args,
                login,
                password,
            } => (args, PayloadPatch::Credentials { login, password }),
            EditCommand::Text { args, text } => (args, PayloadPatch::Text { text }),
        };

        (
            args.id,
            SecretEdit {
                name: args.name,
                description: args.description,
                no_description: args.no_description,
                payload,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, EditCommand, PushCommand, SecretsCommand};
    use clap::{CommandFactory, Parser};
    use keeperctl::{
        SecretPayload,
        payload::Card,
        service::{PayloadPatch, SecretEdit},
    };

    const ID: &str = "018f3d4e-8c2a-7b3e-9a1d-2f4c6e8a0b1c";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(
            ["keeperctl", "-u", "admin", "-p", "P@ssw0rd"]
                .iter()
                .chain(args),
        )
        .unwrap()
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_arguments() {
        let cli = parse(&["--address", "https://keeper:9090", "-v", "register"]);
        assert!(cli.verbose);
        assert_eq!(format!("{:?}", cli.password), "****");

        let (config, command) = cli.into_parts();
        assert_eq!(config.address, "https://keeper:9090");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password.expose(), "P@ssw0rd");
        assert!(matches!(command, Command::Register));
    }

    #[test]
    fn parses_push() {
        let Command::Secrets(SecretsCommand::Push(command)) = parse(&[
            "push",
            "card",
            "-n",
            "visa",
            "--number",
            "4111111111111111",
            "--expiration",
            "12/30",
            "--holder",
            "John Doe",
            "--cvv",
            "123",
        ])
        .command
        else {
            panic!("unexpected command");
        };

        let (args, payload) = command.into_parts();
        assert_eq!(args.name, "visa");
        assert!(args.description.is_empty());
        assert_eq!(
            payload,
            SecretPayload::Card(Card {
                number: "4111111111111111".to_string(),
                expiration: "12/30".to_string(),
                holder: "John Doe".to_string(),
                cvv: 123,
            })
        );

        let Command::Secrets(SecretsCommand::Push(PushCommand::Bin { args, data })) =
            parse(&["push", "bin", "-n", "key", "-d", "ssh key", "--data", "deadbeef"]).command
        else {
            panic!("unexpected command");
        };
        assert_eq!(args.description, "ssh key");
        assert_eq!(data.0, vec![0xde, 0xad, 0xbe, 0xef]);

        assert!(
            Cli::try_parse_from([
                "keeperctl", "-u", "admin", "-p", "P@ssw0rd", "push", "bin", "-n", "key", "-b",
                "not-hex"
            ])
            .is_err()
        );
    }

    #[test]
    fn parses_edit() {
        let Command::Secrets(SecretsCommand::Edit(command)) =
            parse(&["edit", "creds", ID, "--no-description", "-p", "secret"]).command
        else {
            panic!("unexpected command");
        };

        let (id, edit) = command.into_parts();
        assert_eq!(id.to_string(), ID);
        assert_eq!(
            edit,
            SecretEdit {
                name: None,
                description: None,
                no_description: true,
                payload: PayloadPatch::Credentials {
                    login: None,
                    password: Some("secret".to_string()),
                },
            }
        );

        let Command::Secrets(SecretsCommand::Edit(EditCommand::Text { args, text })) =
            parse(&["edit", "text", ID, "-n", "memo"]).command
        else {
            panic!("unexpected command");
        };
        assert_eq!(args.name.as_deref(), Some("memo"));
        assert_eq!(text, None);

        assert!(
            Cli::try_parse_from([
                "keeperctl",
                "-u",
                "admin",
                "-p",
                "P@ssw0rd",
                "edit",
                "text",
                ID,
                "-d",
                "description",
                "--no-description"
            ])
            .is_err()
        );
    }
}
