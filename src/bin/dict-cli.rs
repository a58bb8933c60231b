use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "dict-cli")]
#[command(about = "Look up words in a running Bishnupriya dictionary server", long_about = None)]
struct Cli {
    /// Base URL of the API, including its base path.
    #[arg(short, long, default_value = "http://localhost:3000/api")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchLanguage {
    Bpy,
    Bn,
    En,
}

impl SearchLanguage {
    fn code(self) -> &'static str {
        match self {
            SearchLanguage::Bpy => "bpy",
            SearchLanguage::Bn => "bn",
            SearchLanguage::En => "en",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the alphabet letters
    Alphabets,
    /// List every word starting with a letter
    Alphabet { letter: String },
    /// Search for a word
    Search {
        term: String,
        #[arg(short, long, value_enum, default_value = "bpy")]
        language: SearchLanguage,
    },
    /// Show one word in full
    Word { id: String },
    /// Check that the server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let request = match &cli.command {
        Commands::Alphabets => client.get(endpoint(&base, &["dictionary", "alphabets"])?),
        Commands::Alphabet { letter } => {
            client.get(endpoint(&base, &["dictionary", "alphabet", letter.as_str()])?)
        }
        Commands::Search { term, language } => client
            .get(endpoint(&base, &["dictionary", "search"])?)
            .query(&[("term", term.as_str()), ("language", language.code())]),
        Commands::Word { id } => client.get(endpoint(&base, &["dictionary", "word", id.as_str()])?),
        Commands::Health => client.get(endpoint(&base, &["health"])?),
    };

    print_response(request.send().await?).await
}

/// Append path segments to the API base, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("not a valid API base URL: {base}"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: dictionary API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
