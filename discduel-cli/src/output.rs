/// Output formatting: terminal ranking tables and JSON.
use discduel_core::{SharedSong, Song};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedSong<'a> {
    rank: usize,
    id: &'a str,
    name: &'a str,
    album: &'a str,
    artists: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    elo: Option<i32>,
}

#[derive(Serialize)]
struct JsonRanking<'a> {
    songs: Vec<JsonRankedSong<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_votes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    share_token: Option<&'a str>,
}

/// Print a finished session's ranking as a formatted terminal table.
pub fn print_table(ranked: &[Song]) {
    let name_width = column_width(ranked.iter().map(|s| s.name.chars().count()));
    let album_width = column_width(ranked.iter().map(|s| s.album.chars().count())).max("Album".len());

    println!(" # | {:<name_width$} | {:<album_width$} |  Elo", "Song", "Album");
    println!(
        "---|-{}-|-{}-|------",
        "-".repeat(name_width),
        "-".repeat(album_width)
    );

    for (i, song) in ranked.iter().enumerate() {
        println!(
            "{:>2} | {:<name_width$} | {:<album_width$} | {:>4}",
            i + 1,
            song.name,
            song.album,
            song.elo,
        );
    }
}

/// Print a finished session's ranking as JSON, including the share token.
pub fn print_json(ranked: &[Song], total_votes: usize, share_token: &str) {
    let songs = ranked
        .iter()
        .enumerate()
        .map(|(i, song)| JsonRankedSong {
            rank: i + 1,
            id: &song.id,
            name: &song.name,
            album: &song.album,
            artists: &song.artists,
            elo: Some(song.elo),
        })
        .collect();

    let output = JsonRanking {
        songs,
        total_votes: Some(total_votes),
        share_token: Some(share_token),
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// Print a decoded share link the way the share page renders it: place,
/// name, album. No ratings — the token doesn't carry them.
pub fn print_share_table(tracks: &[SharedSong]) {
    for (i, track) in tracks.iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, track.name, track.album);
    }
}

/// Print a decoded share link as JSON.
pub fn print_share_json(tracks: &[SharedSong]) {
    let songs = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| JsonRankedSong {
            rank: i + 1,
            id: &track.id,
            name: &track.name,
            album: &track.album,
            artists: &track.artists,
            elo: None,
        })
        .collect();

    let output = JsonRanking {
        songs,
        total_votes: None,
        share_token: None,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn column_width(lengths: impl Iterator<Item = usize>) -> usize {
    lengths.max().unwrap_or(4).max(4)
}
