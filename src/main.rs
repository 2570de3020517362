//! Terminal front-end for the Carcio daily games

use std::sync::Arc;

use anyhow::Context;
use carcio::{
    api::{Gateway, HttpGateway, ImageResolver},
    catalog::Catalog,
    config::{self, ClientConfig},
    driver::{Command, Driver},
    game_type::GameType,
    view,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carcio")]
#[command(about = "Daily football trivia in the terminal")]
struct Args {
    /// Game to play (equipo-nacional, equipo-internacional, orbita,
    /// trayectoria-internacional); lists the games when omitted
    game: Option<GameType>,

    /// Base URL of the game API, overriding CARCIO_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Host for relative image paths, overriding CARCIO_IMAGE_HOST
    #[arg(long)]
    image_host: Option<String>,

    /// Request timeout in seconds, overriding CARCIO_HTTP_TIMEOUT_SECS
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Nothing,
    Quit,
    Command(Command),
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line {
        "" => Input::Nothing,
        "/salir" => Input::Quit,
        "/pista" => Input::Command(Command::Hint),
        "/club" => Input::Command(Command::RevealClub),
        "/rendirse" => Input::Command(Command::Surrender),
        "/reintentar" => Input::Command(Command::Retry),
        other if other.starts_with('/') => Input::Unknown(other.to_owned()),
        guess => Input::Command(Command::Guess(guess.to_owned())),
    }
}

fn refusal(command: &Command) -> &'static str {
    match command {
        Command::Guess(_) => "Respuesta no válida",
        Command::Hint => "No hay pistas disponibles",
        Command::RevealClub => "No se puede revelar un club",
        Command::Surrender => "No hay un juego en curso",
        Command::Retry => "No hay nada que reintentar",
    }
}

fn load_config(args: &Args) -> Result<ClientConfig, config::Error> {
    dotenvy::dotenv().ok();
    ClientConfig::from_lookup(|key| {
        let flag = match key {
            config::API_URL_VAR => args.api_url.clone(),
            config::IMAGE_HOST_VAR => args.image_host.clone(),
            config::TIMEOUT_VAR => args.timeout.map(|secs| secs.to_string()),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })
}

fn print_page<G: Gateway + 'static>(driver: &Driver<G>, images: &ImageResolver) {
    println!("\n{}", view::render(driver.session(), images));
}

async fn list(gateway: &HttpGateway) {
    let catalog = Catalog::load(gateway).await;
    println!("Juegos del día\n");
    for entry in catalog.entries() {
        println!("  {}", entry.title);
        println!("    {}", entry.description);
        println!("    carcio {}\n", entry.game_type.path_segment());
    }
}

async fn play(gateway: Arc<HttpGateway>, game_type: GameType) -> anyhow::Result<()> {
    let images = gateway.images().clone();
    let mut driver = Driver::mount(gateway, game_type);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_page(&driver, &images);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match parse_input(&line) {
                    Input::Nothing => continue,
                    Input::Quit => break,
                    Input::Command(command) => {
                        let reason = refusal(&command);
                        if !driver.command(command) {
                            println!("{reason}");
                            continue;
                        }
                    }
                    Input::Unknown(command) => {
                        println!("Comando desconocido: {command}");
                        continue;
                    }
                }
            }
            Some(event) = driver.next_event() => {
                if !driver.apply(event) {
                    continue;
                }
            }
        }
        print_page(&driver, &images);
    }

    driver.teardown();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "carcio=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args).context("invalid configuration")?;
    tracing::info!(api = config.api_base_url(), "starting");
    let gateway = HttpGateway::new(config).context("failed to build HTTP client")?;

    match args.game {
        Some(game_type) => play(Arc::new(gateway), game_type).await,
        None => {
            list(&gateway).await;
            Ok(())
        }
    }
}
