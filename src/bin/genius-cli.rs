use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Parser, Subcommand};
use genius::client::api::ApiClient;
use genius::client::conversation::ConversationController;
use genius::client::image::ImageController;
use genius::client::render::{render_markdown_html, render_text};
use genius::client::{ClientError, UsageRefresh};
use genius::llm::types::{Message, Role};
use genius::types::{Amount, ChatFeature, Resolution};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "genius-cli", about = "Terminal front-end for the Genius proxy")]
struct Cli {
    #[arg(long, env = "GENIUS_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "GENIUS_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Interactive conversation.
    Conversation {
        /// Print assistant replies as HTML rendered from markdown.
        #[arg(long)]
        html: bool,
    },
    /// Interactive code generation.
    Code {
        #[arg(long)]
        html: bool,
    },
    /// Generate images and print their URLs.
    Image {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value_t = Amount::One)]
        amount: Amount,
        #[arg(long, default_value_t = Resolution::Medium)]
        resolution: Resolution,
    },
}

/// Counts settled requests for the session; stands in for a usage re-fetch.
#[derive(Default)]
struct SessionUsage(AtomicUsize);

impl UsageRefresh for SessionUsage {
    fn refresh(&self) {
        let requests = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(requests, "usage refreshed");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.base_url, cli.session_token)?;

    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Conversation { html } => run_chat(&api, ChatFeature::Conversation, html).await,
        Command::Code { html } => run_chat(&api, ChatFeature::Code, html).await,
        Command::Image { prompt, amount, resolution } => run_image(&api, prompt, amount, resolution).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let status = reqwest::get(url).await?.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_chat(api: &ApiClient, feature: ChatFeature, html: bool) -> Result<(), CliError> {
    let usage = SessionUsage::default();
    let mut page = ConversationController::new(feature);
    let label = genius::types::Feature::from(feature).name();

    loop {
        eprint!("{label}> ");
        io::stderr().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        page.form.prompt = line.trim_end_matches(['\r', '\n']).to_owned();

        match page.submit(api, &usage).await {
            Ok(()) => print_transcript(page.display(), html),
            Err(ClientError::InvalidForm(e)) => eprintln!("{e}"),
            Err(e) => eprintln!("request failed: {e}"),
        }
    }

    eprintln!("{} request(s) this session", usage.0.load(Ordering::SeqCst));
    Ok(())
}

fn print_transcript<'a>(messages: impl Iterator<Item = &'a Message>, html: bool) {
    println!("----");
    for message in messages {
        let text = render_text(message.content.as_ref());
        match message.role {
            Role::Assistant if html => println!("[assistant]\n{}", render_markdown_html(&text)),
            Role::Assistant => println!("[assistant]\n{text}"),
            Role::User => println!("[you]\n{text}"),
            Role::System => println!("[system]\n{text}"),
        }
    }
}

async fn run_image(api: &ApiClient, prompt: String, amount: Amount, resolution: Resolution) -> Result<(), CliError> {
    let mut page = ImageController::new();
    page.form.prompt = prompt;
    page.form.amount = amount;
    page.form.resolution = resolution;

    page.submit(api, &SessionUsage::default()).await?;
    for image in page.images() {
        println!("{}", image.url);
    }
    Ok(())
}
