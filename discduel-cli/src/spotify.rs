/// Spotify Web API catalog client.
///
/// Client-credentials flow only: enough to search artists, list albums, and
/// pull album tracks. The access token is cached in the client and refreshed
/// shortly before it expires. Returns Err only on HTTP/API failures; the
/// responses are normalized into core `Song` records before anyone else
/// sees them.
use std::time::{Duration, Instant};

use discduel_core::Song;
use reqwest::Client;
use serde::Deserialize;

const ACCOUNTS_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";

/// How long before the advertised expiry we stop trusting a cached token.
const TOKEN_EXPIRY_SLACK: Duration = Duration::from_secs(30);

pub struct SpotifyClient {
    http: Client,
    client_id: String,
    client_secret: String,
    market: String,
    token: Option<CachedToken>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// An artist search hit.
#[derive(Debug, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// An album from an artist's catalog listing.
#[derive(Debug, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub album_type: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SearchResponse {
    artists: ArtistPage,
}

#[derive(Deserialize)]
struct ArtistPage {
    items: Vec<Artist>,
}

#[derive(Deserialize)]
struct AlbumPage {
    items: Vec<Album>,
}

#[derive(Deserialize)]
struct AlbumDetails {
    name: String,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct Image {
    url: String,
}

#[derive(Deserialize)]
struct TrackPage {
    items: Vec<Track>,
}

#[derive(Deserialize)]
struct Track {
    id: String,
    name: String,
    preview_url: Option<String>,
    #[serde(default)]
    artists: Vec<TrackArtist>,
}

#[derive(Deserialize)]
struct TrackArtist {
    name: String,
}

impl SpotifyClient {
    pub fn new(client_id: String, client_secret: String, market: String) -> Self {
        SpotifyClient {
            http: Client::new(),
            client_id,
            client_secret,
            market,
            token: None,
        }
    }

    /// Current access token, fetching a fresh one when the cache is stale.
    async fn token(&mut self) -> Result<String, String> {
        if let Some(ref cached) = self.token {
            if cached.expires_at > Instant::now() {
                return Ok(cached.access_token.clone());
            }
        }

        let resp = self
            .http
            .post(ACCOUNTS_TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| format!("Spotify token request failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!(
                "Spotify token endpoint returned {} (check your credentials)",
                resp.status()
            ));
        }

        let data: TokenResponse = resp
            .json()
            .await
            .map_err(|e| format!("Failed to parse Spotify token response: {e}"))?;

        let expires_at = Instant::now()
            + Duration::from_secs(data.expires_in).saturating_sub(TOKEN_EXPIRY_SLACK);
        let access_token = data.access_token.clone();
        self.token = Some(CachedToken {
            access_token: data.access_token,
            expires_at,
        });

        Ok(access_token)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &mut self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, String> {
        let token = self.token().await?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| format!("Spotify {what} request failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("Spotify {what} request returned {}", resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| format!("Failed to parse Spotify {what} response: {e}"))
    }

    /// Top artist matches for a free-text query.
    pub async fn search_artists(&mut self, query: &str) -> Result<Vec<Artist>, String> {
        let url = format!("{API_BASE}/search");
        let resp: SearchResponse = self
            .get_json(&url, &[("q", query), ("type", "artist"), ("limit", "10")], "artist search")
            .await?;
        Ok(resp.artists.items)
    }

    /// Albums and singles in the artist's catalog for the configured market.
    pub async fn artist_albums(&mut self, artist_id: &str) -> Result<Vec<Album>, String> {
        let url = format!("{API_BASE}/artists/{artist_id}/albums");
        let market = self.market.clone();
        let resp: AlbumPage = self
            .get_json(
                &url,
                &[
                    ("include_groups", "album,single"),
                    ("market", market.as_str()),
                    ("limit", "50"),
                ],
                "album listing",
            )
            .await?;
        Ok(resp.items)
    }

    /// All tracks on an album, merged with the album's name and cover art
    /// and ready to battle at the baseline rating.
    pub async fn album_tracks(&mut self, album_id: &str) -> Result<Vec<Song>, String> {
        let details_url = format!("{API_BASE}/albums/{album_id}");
        let details: AlbumDetails = self.get_json(&details_url, &[], "album details").await?;
        let album_image = details.images.first().map(|img| img.url.clone());

        let tracks_url = format!("{API_BASE}/albums/{album_id}/tracks");
        let page: TrackPage = self
            .get_json(&tracks_url, &[("limit", "50")], "album tracks")
            .await?;

        let songs = page
            .items
            .into_iter()
            .map(|track| {
                let mut song = Song::new(track.id, track.name, details.name.clone());
                song.image = album_image.clone();
                song.preview_url = track.preview_url;
                song.artists = track.artists.into_iter().map(|a| a.name).collect();
                song
            })
            .collect();

        Ok(songs)
    }
}
