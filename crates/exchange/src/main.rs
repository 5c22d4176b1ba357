use hermes_exchange::{Exchange, ExchangeConfig, init_logging};

fn print_help() {
    eprintln!(
        r#"Hermes - spot exchange matching and settlement service

USAGE:
    hermes [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --demo              Seed the two demo accounts (ignored with --config)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                Server host (default: 0.0.0.0)
    PORT                Server port (default: 8080)
    RUST_LOG            Log level filter (overrides the config log_level)

EXAMPLES:
    # Run with defaults and no accounts
    hermes

    # Run with the demo traders
    hermes --demo

    # Run with config file
    hermes --config config.json

    # Run with custom port
    PORT=9000 hermes
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut demo = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--demo" => demo = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match &config_path {
        Some(path) => ExchangeConfig::from_file(path)?,
        None if demo => ExchangeConfig::with_demo_accounts(),
        None => ExchangeConfig::default(),
    }
    .with_env_overrides();

    init_logging(&config.log_level);
    match &config_path {
        Some(path) => log::info!("Loaded configuration from: {}", path),
        None => log::info!("Using default configuration"),
    }
    log::info!("Exchange: {}", config.name);
    log::info!("Accounts: {}", config.accounts.len());

    let exchange = Exchange::from_config(config).await?;

    log::info!("Starting {}", exchange.config.name);
    log::info!("REST API: http://{}/", exchange.config.bind_address());
    log::info!("Available endpoints:");
    log::info!("  POST /orders");
    log::info!("  GET  /orders/{{id}}");
    log::info!("  POST /orders/{{id}}/cancel");
    log::info!("  GET  /orderbook/{{instrument_pair}}");
    log::info!("  GET  /accounts/{{id}}/balance");

    exchange.run().await
}
