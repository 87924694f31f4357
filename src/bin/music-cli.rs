use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use music_api::config::UpstreamConfig;
use music_api::upstream::{
    MusicProvider, NeteaseClient, SearchQuery, SearchType, UpstreamReply,
};

#[derive(Parser)]
#[command(name = "music-cli")]
#[command(about = "Exploratory CLI for the music provider gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Upstream request timeout in seconds.
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalogue and print the raw response
    Search {
        keyword: String,
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
        #[arg(long = "type", value_enum, default_value_t = Kind::Song)]
        kind: Kind,
        /// Truncate pretty-printed output to this many characters
        #[arg(long, default_value_t = 2000)]
        max_chars: usize,
    },
    /// Resolve a playback URL for a song id
    Url {
        id: String,
        #[arg(long, default_value_t = 320_000)]
        br: u32,
    },
    /// Look up details for comma-separated song ids
    Detail { ids: String },
    /// Search songs and check which ones resolve to a playable URL
    Free {
        keyword: String,
        #[arg(short, long, default_value_t = 3)]
        limit: u32,
        #[arg(long, default_value_t = 128_000)]
        br: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Song,
    Album,
    Artist,
    Playlist,
}

impl From<Kind> for SearchType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Song => SearchType::Song,
            Kind::Album => SearchType::Album,
            Kind::Artist => SearchType::Artist,
            Kind::Playlist => SearchType::Playlist,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = NeteaseClient::new(&UpstreamConfig {
        base_url: cli.base_url,
        request_timeout_secs: cli.timeout,
        ..UpstreamConfig::default()
    })?;

    match cli.command {
        Commands::Search {
            keyword,
            limit,
            kind,
            max_chars,
        } => {
            println!("Searching: {keyword}");
            let query = SearchQuery::songs(keyword)
                .with_kind(kind.into())
                .with_limit(limit);
            let reply = client.search(&query).await?;
            print_reply(&reply, Some(max_chars))?;
        }
        Commands::Url { id, br } => {
            println!("Resolving playback URL for song {id}");
            let reply = client.song_url(&id, br).await?;
            print_reply(&reply, None)?;
        }
        Commands::Detail { ids } => {
            let reply = client.song_detail(&ids).await?;
            print_reply(&reply, None)?;
        }
        Commands::Free { keyword, limit, br } => {
            println!("Searching: {keyword}");
            let found = client
                .search_songs(&SearchQuery::songs(keyword).with_limit(limit))
                .await?;
            println!("Search code: {}\n", found.code);

            for (i, song) in found.songs().iter().enumerate() {
                println!(
                    "{}. {} - {} (ID: {}, fee: {})",
                    i + 1,
                    song.artist_names(),
                    song.name,
                    song.id,
                    song.fee
                );

                let urls = client.song_urls(&song.id.to_string(), br).await?;
                match urls.data.first() {
                    Some(entry) => match &entry.url {
                        Some(url) => println!("   ✅ URL: {}...\n", truncate(url, 80)),
                        None => println!(
                            "   ❌ unavailable (code: {}, response code: {})\n",
                            entry.code, urls.code
                        ),
                    },
                    None => println!("   ❌ no URL data (response code: {})\n", urls.code),
                }
            }
        }
    }

    Ok(())
}

fn print_reply(reply: &UpstreamReply, max_chars: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Response code: {}", reply.code);
    if !reply.is_ok() {
        eprintln!("Request failed");
    }

    let json: Value = serde_json::from_slice(&reply.body)?;
    let pretty = serde_json::to_string_pretty(&json)?;
    match max_chars {
        Some(max) => println!("{}", truncate(&pretty, max)),
        None => println!("{pretty}"),
    }
    Ok(())
}

/// First `max` characters, never splitting a UTF-8 sequence.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
