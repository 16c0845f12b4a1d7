mod config;
mod output;
mod spotify;

use clap::Parser;
use discduel_core::{share, RankingSession, Song, VoteResult};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::DiscduelConfig;
use crate::spotify::SpotifyClient;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "discduel", version, about = "Rank songs with head-to-head battles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run an interactive battle session and rank the songs
    Rank(RankArgs),
    /// List an artist's albums so their IDs can be fed to `rank --album`
    Albums(AlbumsArgs),
    /// Decode a share link and print the ranking it carries
    Show(ShowArgs),
    /// Create a default config file at ~/.config/discduel/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// File with songs: a JSON array of song records (or names), or one
    /// name per line
    #[arg(long)]
    songs: Option<PathBuf>,

    /// Inline song name (repeatable)
    #[arg(long = "song")]
    inline_songs: Vec<String>,

    /// Spotify album ID to pull tracks from (repeatable; needs credentials)
    #[arg(long = "album")]
    albums: Vec<String>,

    /// Output the final ranking as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show rating movement while voting
    #[arg(short, long)]
    verbose: bool,

    /// Base URL printed in front of the share token
    #[arg(long)]
    share_base: Option<String>,

    /// Spotify app client ID (also reads SPOTIFY_CLIENT_ID env var)
    #[arg(long)]
    client_id: Option<String>,

    /// Spotify app client secret (also reads SPOTIFY_CLIENT_SECRET env var)
    #[arg(long)]
    client_secret: Option<String>,

    /// Path to config file (default: ~/.config/discduel/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct AlbumsArgs {
    /// Artist name to search for
    artist: String,

    /// Spotify app client ID (also reads SPOTIFY_CLIENT_ID env var)
    #[arg(long)]
    client_id: Option<String>,

    /// Spotify app client secret (also reads SPOTIFY_CLIENT_SECRET env var)
    #[arg(long)]
    client_secret: Option<String>,

    /// Path to config file (default: ~/.config/discduel/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct ShowArgs {
    /// A share token, or a full share link containing `/s/<token>`
    token: String,

    /// Output the decoded ranking as JSON
    #[arg(long)]
    json: bool,
}

/// Parse a songs file as either a JSON array (full song records or plain
/// names) or plain text, one name per line.
fn parse_songs_from_str(content: &str, next_id: &mut usize) -> Vec<Song> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        if let Ok(songs) = serde_json::from_str::<Vec<Song>>(trimmed) {
            return songs;
        }
        let names: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("Songs file looks like JSON but failed to parse: {e}")));
        names
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| named_song(name, next_id))
            .collect()
    } else {
        trimmed
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| named_song(line.to_string(), next_id))
            .collect()
    }
}

/// A song known only by name gets a synthetic sequential ID.
fn named_song(name: String, next_id: &mut usize) -> Song {
    *next_id += 1;
    Song::new(format!("song{}", *next_id), name, "")
}

/// Accept either a bare share token or a full link containing `/s/<token>`.
fn extract_token(input: &str) -> &str {
    let trimmed = input.trim().trim_end_matches('/');
    match trimmed.rfind("/s/") {
        Some(idx) => &trimmed[idx + 3..],
        None => trimmed,
    }
}

fn render_song(song: &Song) -> String {
    if song.album.is_empty() {
        song.name.clone()
    } else {
        format!("{} ({})", song.name, song.album)
    }
}

/// Resolve Spotify credentials: CLI flag > config file > env var.
fn spotify_client(
    client_id: Option<String>,
    client_secret: Option<String>,
    cfg: &DiscduelConfig,
    config_path: &Path,
) -> SpotifyClient {
    let client_id = client_id
        .or_else(|| cfg.client_id.clone())
        .or_else(|| std::env::var("SPOTIFY_CLIENT_ID").ok())
        .unwrap_or_else(|| {
            bail(format!(
                "No Spotify client ID. Pass --client-id, set SPOTIFY_CLIENT_ID, or add it to {}",
                config_path.display()
            ));
        });
    let client_secret = client_secret
        .or_else(|| cfg.client_secret.clone())
        .or_else(|| std::env::var("SPOTIFY_CLIENT_SECRET").ok())
        .unwrap_or_else(|| {
            bail(format!(
                "No Spotify client secret. Pass --client-secret, set SPOTIFY_CLIENT_SECRET, or add it to {}",
                config_path.display()
            ));
        });
    let market = cfg.market.clone().unwrap_or_else(|| "US".to_string());

    SpotifyClient::new(client_id, client_secret, market)
}

/// Load songs from all sources: --songs file, --song inline args, --album
/// catalog pulls.
async fn load_songs(args: &RankArgs, cfg: &DiscduelConfig, config_path: &Path) -> Vec<Song> {
    let mut songs: Vec<Song> = Vec::new();
    let mut next_id = 0usize;

    if let Some(ref path) = args.songs {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read songs file {}: {e}", path.display())));
        songs = parse_songs_from_str(&content, &mut next_id);
    }

    songs.extend(
        args.inline_songs
            .iter()
            .map(|name| named_song(name.clone(), &mut next_id)),
    );

    if !args.albums.is_empty() {
        let mut client = spotify_client(
            args.client_id.clone(),
            args.client_secret.clone(),
            cfg,
            config_path,
        );
        for album_id in &args.albums {
            let tracks = client
                .album_tracks(album_id)
                .await
                .unwrap_or_else(|e| bail(e));
            if args.verbose {
                eprintln!("Album {album_id}: {} tracks", tracks.len());
            }
            songs.extend(tracks);
        }
    }

    if songs.len() < 2 {
        bail(format!(
            "Need at least 2 songs to battle, got {}. Use --songs <file>, --song <name>, or --album <id>.",
            songs.len()
        ));
    }
    songs
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => run_rank(args).await,
        Commands::Albums(args) => run_albums(args).await,
        Commands::Show(args) => run_show(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to add your Spotify credentials.");
        }
    }
}

async fn run_rank(args: RankArgs) {
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let songs = load_songs(&args, &cfg, &config_path).await;
    let song_count = songs.len();

    let mut session = RankingSession::start(songs).unwrap_or_else(|e| bail(e));

    println!("{song_count} songs loaded — {} votes to a full ranking.", session.target_count());
    println!("Pick the song you prefer: 1 or 2, q to quit.\n");

    let stdin = io::stdin();
    let mut input = String::new();

    let (ranking, share_token) = loop {
        let (left, right) = session.current_pair().unwrap_or_else(|e| bail(e));
        println!(
            "Vote {}/{}",
            session.resolved_count() + 1,
            session.target_count()
        );
        println!("  [1] {}", render_song(left));
        println!("  [2] {}", render_song(right));
        print!("> ");
        io::stdout().flush().ok();

        input.clear();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .unwrap_or_else(|e| bail(format!("Failed to read vote: {e}")));
        if read == 0 {
            // stdin closed mid-battle
            println!("\nBattle abandoned — nothing saved.");
            return;
        }

        let (winner, loser) = match input.trim() {
            "1" => (left.id.clone(), right.id.clone()),
            "2" => (right.id.clone(), left.id.clone()),
            "q" | "quit" => {
                println!("Battle abandoned — nothing saved.");
                return;
            }
            _ => {
                println!("Please answer 1, 2, or q.\n");
                continue;
            }
        };

        match session.submit_outcome(&winner, &loser) {
            Ok(VoteResult::Next(_)) => {
                if args.verbose {
                    for song in session
                        .songs()
                        .iter()
                        .filter(|s| s.id == winner || s.id == loser)
                    {
                        eprintln!("  {} → {}", song.name, song.elo);
                    }
                }
                println!();
            }
            Ok(VoteResult::Finished { ranking, share_token }) => break (ranking, share_token),
            Err(e) => bail(e),
        }
    };

    println!("\nYour Ranking\n");
    if args.json {
        output::print_json(&ranking, session.target_count(), &share_token);
    } else {
        output::print_table(&ranking);
        match args.share_base.or(cfg.share_base) {
            Some(base) => println!("\nShare link: {base}{share_token}"),
            None => println!("\nShare token: {share_token}"),
        }
    }
}

async fn run_albums(args: AlbumsArgs) {
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let mut client = spotify_client(args.client_id, args.client_secret, &cfg, &config_path);

    let artists = client
        .search_artists(&args.artist)
        .await
        .unwrap_or_else(|e| bail(e));
    let artist = artists
        .first()
        .unwrap_or_else(|| bail(format!("No artist found for \"{}\"", args.artist)));

    if artists.len() > 1 {
        let others: Vec<&str> = artists[1..].iter().map(|a| a.name.as_str()).collect();
        eprintln!("Matched \"{}\"; other hits: {}", artist.name, others.join(", "));
    }

    let albums = client
        .artist_albums(&artist.id)
        .await
        .unwrap_or_else(|e| bail(e));

    println!("Albums for {} ({}):", artist.name, artist.id);
    for album in &albums {
        println!(
            "  {}  {:<10}  {} [{}]",
            album.id, album.release_date, album.name, album.album_type
        );
    }
    println!("\nRun: discduel rank --album <id> [--album <id> ...]");
}

fn run_show(args: ShowArgs) {
    let token = extract_token(&args.token);
    match share::decode(token) {
        Ok(tracks) => {
            if args.json {
                output::print_share_json(&tracks);
            } else {
                println!("Ranking Results\n");
                output::print_share_table(&tracks);
            }
        }
        Err(e) => {
            eprintln!("This link is corrupted or incomplete. ({e})");
            std::process::exit(1);
        }
    }
}
