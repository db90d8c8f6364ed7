//! Storefront command-line client.
//!
//! Signs in against the storefront API and keeps the bearer token in a state
//! directory between invocations.
//!
//! # Usage
//!
//! ```bash
//! storefront --base-url http://localhost:8000/api/v1 login --email admin@shop.test
//! storefront whoami
//! storefront orders --all
//! storefront upload ./front.png ./back.png
//! storefront logout
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storefront_client::{ClientConfig, ClientError, FilePart, FileTokenStore, Storefront};

/// Command-line client for the storefront API.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about = "Talk to the storefront REST API from the terminal")]
struct Cli {
    /// API base URL, including the version prefix.
    #[arg(long, env = "STOREFRONT_API_BASE_URL")]
    base_url: Option<String>,

    /// Directory holding the persisted session.
    #[arg(long, env = "STOREFRONT_STATE_DIR", default_value = ".storefront")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and remember the session.
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List the catalog.
    Products,
    /// List orders.
    Orders {
        /// Every order in the shop (admin only).
        #[arg(long)]
        all: bool,
    },
    /// Upload images and print their public URLs.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the public URL of an uploaded file.
    FileUrl { filename: String },
}

fn content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn read_file(path: &Path) -> Result<FilePart, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("invalid file name: {}", path.display()))?;

    let file = FilePart::new(name, bytes);
    Ok(match content_type(path) {
        Some(content_type) => file.with_content_type(content_type),
        None => file,
    })
}

async fn run(storefront: &Storefront, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Login { email, password } => {
            let user = storefront.login(&email, &password).await?;
            println!("Signed in as {} ({})", user.email, user.role);
        }
        Command::Logout => {
            storefront.logout().await?;
            println!("Signed out");
        }
        Command::Whoami => match storefront.init().await {
            Some(user) => {
                let role = if storefront.session().is_admin() {
                    "admin"
                } else {
                    "client"
                };
                println!("{} ({role})", user.email);
            }
            None => println!("Not signed in"),
        },
        Command::Products => {
            for product in storefront.api().list_products().await? {
                println!("{:>5}  {:<40} {:>10.2}", product.id, product.name, product.price);
            }
        }
        Command::Orders { all } => {
            storefront.init().await;
            let orders = if all {
                storefront.api().get_all_orders().await?
            } else {
                storefront.api().list_orders().await?
            };
            for order in orders {
                println!(
                    "{:>5}  {}  {:<10} {:>10.2}",
                    order.id,
                    order.created_at.format("%Y-%m-%d %H:%M"),
                    format!("{:?}", order.status).to_lowercase(),
                    order.total_amount
                );
            }
        }
        Command::Upload { files } => {
            storefront.init().await;
            let parts = files
                .iter()
                .map(|path| read_file(path))
                .collect::<Result<Vec<_>, _>>()
                .map_err(ClientError::Configuration)?;

            for uploaded in storefront.upload_images(parts).await? {
                println!("{}", storefront.file_url(&uploaded.filename));
            }
        }
        Command::FileUrl { filename } => println!("{}", storefront.file_url(&filename)),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::default();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let store = match FileTokenStore::new(&cli.state_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let storefront = match Storefront::new(config, store) {
        Ok(storefront) => storefront,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(state_dir = %cli.state_dir.display(), "storefront client ready");

    match run(&storefront, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_upload() {
        let cli = Cli::try_parse_from(["storefront", "--state-dir", "/tmp/s", "upload", "a.png", "b.jpg"])
            .unwrap();
        assert_eq!(cli.state_dir, PathBuf::from("/tmp/s"));
        match cli.command {
            Command::Upload { files } => assert_eq!(files.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type(Path::new("a.PNG")), Some("image/png"));
        assert_eq!(content_type(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(content_type(Path::new("notes.txt")), None);
        assert_eq!(content_type(Path::new("noext")), None);
    }
}
