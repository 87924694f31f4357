//! Typed views of provider responses.
//!
//! The façade relays bodies untouched and only needs [`Envelope`]; the rest
//! is for callers that want to read the data, such as `music-cli`.

use serde::{Deserialize, Serialize};

/// Shape shared by every provider response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    pub code: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Album {
    pub id: u64,
    pub name: String,
    #[serde(rename = "picUrl", default)]
    pub pic_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Song {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub ar: Vec<Artist>,
    #[serde(default)]
    pub al: Option<Album>,
    /// 0 and 8 are free, 1 is VIP-only, 4 is purchase-only.
    #[serde(default)]
    pub fee: i64,
    /// Duration in milliseconds.
    #[serde(default)]
    pub dt: u64,
}

impl Song {
    /// Names of all credited artists, joined for display.
    pub fn artist_names(&self) -> String {
        if self.ar.is_empty() {
            return "unknown".to_string();
        }
        self.ar
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(rename = "songCount", default)]
    pub song_count: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResponse {
    pub code: i64,
    #[serde(default)]
    pub result: Option<SearchResult>,
}

impl SearchResponse {
    pub fn songs(&self) -> &[Song] {
        self.result.as_ref().map(|r| r.songs.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SongUrl {
    pub id: u64,
    /// Absent when the track is not playable for this account.
    pub url: Option<String>,
    #[serde(default)]
    pub br: u64,
    #[serde(default)]
    pub size: u64,
    pub code: i64,
    #[serde(default)]
    pub fee: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SongUrlResponse {
    pub code: i64,
    #[serde(default)]
    pub data: Vec<SongUrl>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Privilege {
    pub id: u64,
    #[serde(default)]
    pub fee: i64,
    /// Highest bitrate playable for this account.
    #[serde(rename = "pl", default)]
    pub play_bitrate: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SongDetailResponse {
    pub code: i64,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub privileges: Vec<Privilege>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "code": 200,
            "result": {
                "songCount": 1,
                "songs": [{
                    "id": 186016,
                    "name": "晴天",
                    "ar": [{"id": 6452, "name": "周杰伦"}],
                    "al": {"id": 18905, "name": "叶惠美", "picUrl": "http://p1.music.126.net/x.jpg"},
                    "fee": 1,
                    "dt": 269000,
                    "pop": 100
                }]
            }
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, 200);
        assert_eq!(parsed.songs().len(), 1);
        let song = &parsed.songs()[0];
        assert_eq!(song.id, 186016);
        assert_eq!(song.artist_names(), "周杰伦");
        assert_eq!(song.al.as_ref().unwrap().name, "叶惠美");
    }

    #[test]
    fn test_search_without_result_has_no_songs() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"code":400}"#).unwrap();
        assert!(parsed.songs().is_empty());
    }

    #[test]
    fn test_unplayable_url_is_none() {
        let body = r#"{"code":200,"data":[{"id":1,"url":null,"br":0,"size":0,"code":404,"fee":1}]}"#;
        let parsed: SongUrlResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data[0].url, None);
        assert_eq!(parsed.data[0].code, 404);
    }

    #[test]
    fn test_wrong_types_fail_loudly() {
        let body = r#"{"code":200,"data":[{"id":"not-a-number","code":200}]}"#;
        assert!(serde_json::from_str::<SongUrlResponse>(body).is_err());
    }

    #[test]
    fn test_multiple_artists_joined() {
        let song = Song {
            id: 1,
            name: "duet".into(),
            ar: vec![
                Artist { id: 1, name: "A".into() },
                Artist { id: 2, name: "B".into() },
            ],
            al: None,
            fee: 0,
            dt: 0,
        };
        assert_eq!(song.artist_names(), "A / B");
    }
}
