use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

use sdp_revoke::prelude::*;

const SECRET_PROMPT: &str = "Master secret key (S..., input hidden): ";
const CONFIRM_TITLE: &str = "Are you sure you want to revoke access?";
const CONFIRM_BODY: &str = "This action is irreversible. Your SDP host will not be able to \
     restore their access to your account once permissions are revoked.";

#[derive(Parser)]
#[command(name = "sdp-revoke")]
#[command(about = "Revoke an SDP host's signing access to your Stellar accounts", long_about = None)]
struct Cli {
    /// Network to use (mainnet or testnet)
    #[arg(short, long, default_value = "mainnet")]
    network: NetworkId,

    /// Override the Horizon URL of the selected network
    #[arg(long)]
    horizon_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the accounts a public key is an active signer on
    Find {
        /// Your master public key (G...)
        public_key: String,
    },
    /// Zero your key's signing weight on one account
    Revoke {
        /// The account to revoke access to (G...)
        account_id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut builder = HorizonRevokeClient::builder()
        .network(cli.network)
        .request_timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(url) = &cli.horizon_url {
        builder = builder.horizon_url(url);
    }

    let client = match builder.build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Find { public_key } => find(&client, &public_key).await,
        Commands::Revoke { account_id } => revoke(&client, &account_id).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn find(client: &HorizonRevokeClient, public_key: &str) -> Result<(), SdkError> {
    let accounts = client.discovery().find(public_key).await?;
    print_accounts(client, &accounts);
    Ok(())
}

async fn revoke(client: &HorizonRevokeClient, account_id: &str) -> Result<(), SdkError> {
    let account = parse_account_id(account_id).map_err(RevocationError::from)?;
    let mut stdin = BufReader::new(tokio::io::stdin());

    let secret = read_secret().await?;

    println!();
    println!("{CONFIRM_TITLE}");
    println!("{CONFIRM_BODY}");
    println!("Account: {account} ({})", client.network().id.label());
    let answer = prompt(&mut stdin, "Type \"yes\" to revoke: ").await?;
    if !answer.trim().eq_ignore_ascii_case("yes") {
        println!("Cancelled. Nothing was submitted.");
        return Ok(());
    }

    let signer = secret.public_key();
    let receipt = client.revocation().execute(&account, secret).await?;

    println!();
    println!("Key removed successfully");
    println!("Transaction: {} (ledger {})", receipt.hash, receipt.ledger);

    println!();
    println!("Remaining accounts for {signer}:");
    if let Some(accounts) = remaining_accounts(client, &signer).await {
        print_accounts(client, &accounts);
    }
    Ok(())
}

/// Re-run discovery after a revocation. The revocation already succeeded,
/// so a failure here is reported but never fails the command.
async fn remaining_accounts<L: LedgerApi>(
    client: &RevokeClient<L>,
    signer: &PublicKey,
) -> Option<Vec<AccountId>> {
    match client.discovery().find_key(signer).await {
        Ok(accounts) => Some(accounts),
        Err(e) => {
            tracing::warn!(signer = %signer, error = %e, "Re-discovery after revocation failed");
            eprintln!("Warning: could not refresh the account list: {e}");
            None
        }
    }
}

/// Prompt for the secret on the terminal with echo off.
async fn read_secret() -> Result<SecretSeed, SdkError> {
    let line = tokio::task::spawn_blocking(|| {
        rpassword::prompt_password(SECRET_PROMPT).map(Zeroizing::new)
    })
    .await
    .map_err(std::io::Error::other)??;
    parse_secret(&line)
}

fn parse_secret(line: &str) -> Result<SecretSeed, SdkError> {
    Ok(SecretSeed::parse(line).map_err(RevocationError::from)?)
}

/// Read one echoed line from stdin.
async fn prompt(stdin: &mut BufReader<Stdin>, label: &str) -> Result<String, SdkError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    stdin.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

fn print_accounts<L: LedgerApi>(client: &RevokeClient<L>, accounts: &[AccountId]) {
    if accounts.is_empty() {
        println!("No result found");
        return;
    }
    println!("{} account(s) found", accounts.len());
    for account in accounts {
        println!("  {account}");
        println!("    {}", client.network().explorer_account_url(account));
    }
}

fn print_error(e: &SdkError) {
    match e {
        SdkError::Revocation(err) => {
            eprintln!("{}", err.title);
            eprintln!("{}", err.message);
        }
        other => eprintln!("Error: {other}"),
    }
}
