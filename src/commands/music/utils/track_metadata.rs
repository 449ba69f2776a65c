//! Track resolution through the `yt-dlp` command-line tool.

use std::time::Duration;

use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, info, warn};
use url::Url;

use super::format_track_duration;
use super::music_manager::{MusicError, MusicResult};

/// A playable track as resolved by `yt-dlp`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub title: String,
    pub url: String,
    /// `None` for live streams and anything else without a known length.
    pub duration: Option<Duration>,
}

impl TrackMetadata {
    /// The duration as shown in announcements.
    pub fn formatted_duration(&self) -> String {
        format_track_duration(self.duration)
    }
}

/// Everything a query resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
    /// Set when the query was a playlist URL.
    pub playlist: Option<String>,
    pub tracks: Vec<TrackMetadata>,
}

/// Whether the query should be handed to `yt-dlp` as-is rather than searched.
pub fn is_url(query: &str) -> bool {
    Url::parse(query).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Resolve a URL or free-text search to one or more tracks.
pub async fn resolve(query: &str) -> MusicResult<ResolvedQuery> {
    let is_search = !is_url(query);
    let target = if is_search {
        format!("ytsearch1:{}", query)
    } else {
        query.to_string()
    };

    info!("Resolving \"{}\" with yt-dlp", target);
    let output = Command::new("yt-dlp")
        .args(["-J", "--flat-playlist", "--no-warnings", &target])
        .output()
        .await
        .map_err(|e| MusicError::AudioSourceError(format!("Failed to run yt-dlp: {}", e)))?;

    if !output.status.success() {
        warn!(
            "yt-dlp could not resolve \"{}\": {}",
            query,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Err(MusicError::CannotResolve(query.to_string()));
    }

    let resolved = parse_ytdlp_output(&String::from_utf8_lossy(&output.stdout), is_search)?;
    if resolved.tracks.is_empty() {
        return Err(MusicError::NoResults(query.to_string()));
    }
    debug!("Resolved \"{}\" to {} tracks", query, resolved.tracks.len());

    Ok(resolved)
}

/// Parse the JSON printed by `yt-dlp -J --flat-playlist`.
///
/// Searches come back as a playlist named after the query, so their name is
/// dropped. Entries without a URL are skipped.
pub fn parse_ytdlp_output(stdout: &str, is_search: bool) -> MusicResult<ResolvedQuery> {
    let json: Value = serde_json::from_str(stdout).map_err(|e| {
        MusicError::AudioSourceError(format!("Failed to parse video metadata: {}", e))
    })?;

    if json["_type"].as_str() != Some("playlist") {
        let tracks = track_from_json(&json).into_iter().collect();
        return Ok(ResolvedQuery {
            playlist: None,
            tracks,
        });
    }

    let tracks = json["entries"]
        .as_array()
        .map(|entries| entries.iter().filter_map(track_from_json).collect())
        .unwrap_or_default();
    let playlist = if is_search {
        None
    } else {
        Some(
            json["title"]
                .as_str()
                .unwrap_or("Unknown Playlist")
                .to_string(),
        )
    };

    Ok(ResolvedQuery { playlist, tracks })
}

fn track_from_json(json: &Value) -> Option<TrackMetadata> {
    let url = json["webpage_url"]
        .as_str()
        .or_else(|| json["url"].as_str())
        .filter(|url| is_url(url))?;

    let title = json["title"]
        .as_str()
        .unwrap_or("Unknown Title")
        .to_string();

    let duration = json["duration"]
        .as_f64()
        .filter(|secs| *secs > 0.0)
        .map(Duration::from_secs_f64);

    Some(TrackMetadata {
        title,
        url: url.to_string(),
        duration,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("https://www.youtube.com/watch?v=dQw4w9WgXcQ", true)]
    #[case("http://youtu.be/dQw4w9WgXcQ", true)]
    #[case("never gonna give you up", false)]
    #[case("ftp://example.com/song.mp3", false)]
    #[case("dQw4w9WgXcQ", false)]
    fn test_is_url(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(is_url(query), expected);
    }

    #[test]
    fn test_parse_single_video() {
        let stdout = json!({
            "id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "duration": 213,
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hq720.jpg"
        })
        .to_string();

        let resolved = parse_ytdlp_output(&stdout, false).unwrap();

        assert_eq!(
            resolved,
            ResolvedQuery {
                playlist: None,
                tracks: vec![TrackMetadata {
                    title: "Never Gonna Give You Up".to_string(),
                    url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                    duration: Some(Duration::from_secs(213)),
                }],
            }
        );
    }

    #[test]
    fn test_parse_playlist() {
        let stdout = json!({
            "_type": "playlist",
            "title": "Road Trip",
            "entries": [
                { "_type": "url", "title": "First", "url": "https://www.youtube.com/watch?v=aaa", "duration": 61.0 },
                { "_type": "url", "title": "Second", "url": "https://www.youtube.com/watch?v=bbb", "duration": null },
                { "_type": "url", "title": "[Private video]", "url": null }
            ]
        })
        .to_string();

        let resolved = parse_ytdlp_output(&stdout, false).unwrap();

        assert_eq!(resolved.playlist.as_deref(), Some("Road Trip"));
        assert_eq!(resolved.tracks.len(), 2);
        assert_eq!(resolved.tracks[0].formatted_duration(), "1:01");
        assert_eq!(resolved.tracks[1].formatted_duration(), "Live");
    }

    #[test]
    fn test_parse_search_drops_playlist_name() {
        let stdout = json!({
            "_type": "playlist",
            "title": "never gonna",
            "entries": [
                { "title": "Never Gonna Give You Up", "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ", "duration": 213 }
            ]
        })
        .to_string();

        let resolved = parse_ytdlp_output(&stdout, true).unwrap();

        assert_eq!(resolved.playlist, None);
        assert_eq!(resolved.tracks.len(), 1);
    }

    #[test]
    fn test_parse_empty_search() {
        let stdout = json!({ "_type": "playlist", "title": "zzzz", "entries": [] }).to_string();

        let resolved = parse_ytdlp_output(&stdout, true).unwrap();

        assert!(resolved.tracks.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_ytdlp_output("ERROR: Unsupported URL", false);

        assert_matches!(result, Err(MusicError::AudioSourceError(_)));
    }
}
