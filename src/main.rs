use clap::Parser;
use rust_decimal::Decimal;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use touchline::config::AppConfig;
use touchline::error::{AgentError, Result};
use touchline::odds::StaticOddsFeed;
use touchline::wallet::{SimulatedWallet, WalletGateway};
use touchline::ChatSession;

#[derive(Parser)]
#[command(
    name = "touchline",
    about = "Conversational sports-betting demo agent (mock odds, simulated wallet)"
)]
struct Cli {
    /// Configuration directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Pin canned-response wording for reproducible demos
    #[arg(long)]
    seed: Option<u64>,

    /// Override the simulated wallet's starting balance in SOL
    #[arg(long)]
    balance: Option<Decimal>,

    /// Start with the wallet already connected
    #[arg(long)]
    connected: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config_dir)?;
    if let Some(balance) = cli.balance {
        config.wallet.starting_balance = balance;
    }
    if cli.connected {
        config.wallet.start_connected = true;
    }
    if let Err(errors) = config.validate() {
        return Err(AgentError::Validation(errors));
    }

    init_logging(&config.logging.level);

    let odds = Arc::new(StaticOddsFeed::new(std::time::Duration::from_secs(
        config.odds.cache_ttl_secs,
    )));
    let wallet = Arc::new(SimulatedWallet::new(
        config.wallet.starting_balance,
        config.wallet.start_connected,
    ));

    let mut session = match cli.seed {
        Some(seed) => ChatSession::with_seed(&config, odds, wallet.clone(), seed),
        None => ChatSession::new(&config, odds, wallet.clone()),
    };

    info!(
        starting_balance = %config.wallet.starting_balance,
        connected = config.wallet.start_connected,
        "session ready"
    );
    run_repl(&mut session, &wallet).await
}

async fn run_repl(session: &mut ChatSession, wallet: &Arc<SimulatedWallet>) -> Result<()> {
    println!("\x1b[36mTouchline — betting chat demo\x1b[0m");
    println!("Talk to the agent, or use wallet commands: /connect /disconnect /balance /deposit <amt> /withdraw <amt>");
    println!("Type '/exit' to quit.");
    println!();

    let mut rl = DefaultEditor::new().map_err(|e| AgentError::Internal(e.to_string()))?;

    loop {
        match rl.readline("\x1b[36myou>\x1b[0m ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if let Some(command) = line.strip_prefix('/') {
                    if command == "exit" || command == "quit" {
                        break;
                    }
                    match run_wallet_command(command, wallet).await {
                        Ok(reply) => println!("{reply}"),
                        Err(e) => eprintln!("{e}"),
                    }
                    continue;
                }

                let reply = session.process_message(line).await;
                println!("\x1b[33magent>\x1b[0m {reply}");
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("readline error: {e}");
                break;
            }
        }
    }

    Ok(())
}

/// Stand-in for the browser wallet buttons the original demo had
async fn run_wallet_command(command: &str, wallet: &Arc<SimulatedWallet>) -> Result<String> {
    let mut parts = command.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let amount = parts.next().map(str::parse::<Decimal>);

    match (verb, amount) {
        ("connect", None) => {
            wallet.connect();
            Ok(format!(
                "Wallet connected. Balance: {} SOL",
                wallet.balance().await?
            ))
        }
        ("disconnect", None) => {
            wallet.disconnect();
            Ok("Wallet disconnected.".to_string())
        }
        ("balance", None) => Ok(format!("Balance: {} SOL", wallet.balance().await?)),
        ("deposit", Some(Ok(amount))) => Ok(format!(
            "Deposited. Balance: {} SOL",
            wallet.deposit(amount)?
        )),
        ("withdraw", Some(Ok(amount))) => Ok(format!(
            "Withdrawn. Balance: {} SOL",
            wallet.withdraw(amount)?
        )),
        ("deposit" | "withdraw", _) => Err(AgentError::Wallet(
            "usage: /deposit <amount> or /withdraw <amount>".to_string(),
        )),
        _ => Err(AgentError::Internal(format!("unknown command: /{verb}"))),
    }
}

fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
