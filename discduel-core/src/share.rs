/// Share-token codec for finished rankings.
///
/// A token is the ordered ranking projected down to minimal song records,
/// serialized as JSON, base64-encoded with the URL-safe alphabet, and
/// stripped of trailing padding so it can sit directly in a `/s/<token>`
/// URL path segment. Decoding needs no session state — the token is the
/// only artifact that outlives a battle.
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::types::Song;

/// Minimal song record carried inside a share token, in ranked order.
///
/// Single-letter JSON keys keep tokens short: `n` = name, `a` = album,
/// `i` = image, `r` = artists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSong {
    pub id: String,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "a")]
    pub album: String,
    #[serde(rename = "i")]
    pub image: Option<String>,
    #[serde(rename = "r", default)]
    pub artists: Vec<String>,
}

impl From<&Song> for SharedSong {
    fn from(song: &Song) -> Self {
        SharedSong {
            id: song.id.clone(),
            name: song.name.clone(),
            album: song.album.clone(),
            image: song.image.clone(),
            artists: song.artists.clone(),
        }
    }
}

/// Encode a finished ranking as a URL-safe token with no padding.
pub fn encode(ranked: &[Song]) -> String {
    let records: Vec<SharedSong> = ranked.iter().map(SharedSong::from).collect();
    let json = serde_json::to_string(&records).expect("share records always serialize");
    let token = URL_SAFE.encode(json);
    token.trim_end_matches('=').to_string()
}

/// Decode a share token back into the ordered ranking.
///
/// Restores the stripped base64 padding first — the pad length follows from
/// `token.len() % 4`. Anything malformed comes back as a [`DecodeError`]
/// for the caller to render as an invalid link, never a panic.
pub fn decode(token: &str) -> Result<Vec<SharedSong>, DecodeError> {
    let mut normalized = token.to_string();
    let rem = normalized.len() % 4;
    if rem != 0 {
        for _ in 0..4 - rem {
            normalized.push('=');
        }
    }

    let bytes = URL_SAFE.decode(normalized)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, name: &str, album: &str) -> Song {
        let mut song = Song::new(id, name, album);
        song.image = Some(format!("https://img.example/{id}.jpg"));
        song.artists = vec!["Artist One".to_string(), "Artist Two".to_string()];
        song
    }

    fn shared(ranked: &[Song]) -> Vec<SharedSong> {
        ranked.iter().map(SharedSong::from).collect()
    }

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let ranked = vec![
            song("t3", "Closer", "Album B"),
            song("t1", "Opener", "Album A"),
            song("t2", "Middle Eight", "Album A"),
        ];

        let token = encode(&ranked);
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded, shared(&ranked));
    }

    #[test]
    fn test_round_trip_unicode_names() {
        let mut ranked = vec![
            song("t1", "Привет, мир", "Ærøskøbing"),
            song("t2", "曖昧さ回避 🎸", "日本のアルバム"),
            song("t3", "naïve — déjà vu", "Çok güzel"),
        ];
        ranked[0].image = None;
        ranked[2].artists = Vec::new();

        let token = encode(&ranked);
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded, shared(&ranked));
    }

    #[test]
    fn test_round_trip_extremes() {
        assert_eq!(decode(&encode(&[])).unwrap(), Vec::<SharedSong>::new());

        let one = vec![song("only", "Single", "EP")];
        assert_eq!(decode(&encode(&one)).unwrap(), shared(&one));

        let many: Vec<Song> = (0..500)
            .map(|i| song(&format!("t{i}"), &format!("Track {i}"), "Big Album"))
            .collect();
        assert_eq!(decode(&encode(&many)).unwrap(), shared(&many));
    }

    #[test]
    fn test_tokens_are_url_path_safe() {
        let ranked: Vec<Song> = (0..40)
            .map(|i| song(&format!("t{i}"), &format!("Spécial?&/+ {i}"), "Album"))
            .collect();

        let token = encode(&ranked);
        assert!(!token.is_empty());
        assert!(
            token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token contains a character that needs URL escaping"
        );
        assert!(!token.ends_with('='));
    }

    #[test]
    fn test_garbage_tokens_fail_gracefully() {
        assert!(matches!(
            decode("not-a-real-token!!!"),
            Err(DecodeError::Base64(_))
        ));

        // Valid base64, but the payload is not a ranking.
        let not_a_ranking = URL_SAFE.encode("{\"hello\": 42}");
        assert!(matches!(
            decode(not_a_ranking.trim_end_matches('=')),
            Err(DecodeError::Payload(_))
        ));

        // Valid base64, not even UTF-8.
        let binary = URL_SAFE.encode([0xff, 0xfe, 0x00, 0x80]);
        assert!(decode(binary.trim_end_matches('=')).is_err());
    }

    #[test]
    fn test_decode_accepts_padded_tokens_too() {
        let ranked = vec![song("t1", "Padded", "Album")];
        let token = encode(&ranked);

        let rem = token.len() % 4;
        let padded = if rem == 0 {
            token.clone()
        } else {
            format!("{token}{}", "=".repeat(4 - rem))
        };
        assert_eq!(decode(&padded).unwrap(), shared(&ranked));
    }
}
