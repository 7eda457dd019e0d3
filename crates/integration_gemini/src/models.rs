//! Gemini `generateContent` wire types and the answer model handed to callers

use serde::{Deserialize, Serialize};

/// Title used for review-snippet sources that carry none
pub const REVIEW_SOURCE_TITLE: &str = "Review";

/// Latitude/longitude pair as the API expects it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// A citation backing the generated answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Generated text plus the grounding citations that came with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundedAnswer {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<SourceLink>,
}

// Request body

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<ToolConfig>,
}

impl GenerateContentRequest {
    /// Single user turn with search and maps grounding enabled
    pub fn grounded(prompt: String, lat_lng: Option<LatLng>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt),
                    thought: false,
                }],
            }],
            tools: vec![Tool::GoogleSearch(EmptyObject {}), Tool::GoogleMaps(EmptyObject {})],
            tool_config: lat_lng.map(|lat_lng| ToolConfig {
                retrieval_config: RetrievalConfig { lat_lng },
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Reasoning parts are not part of the answer text
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub thought: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmptyObject {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Tool {
    GoogleSearch(EmptyObject),
    GoogleMaps(EmptyObject),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ToolConfig {
    pub retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RetrievalConfig {
    pub lat_lng: LatLng,
}

// Response body

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebChunk>,
    #[serde(default)]
    pub maps: Option<MapsChunk>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MapsChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_answer_sources: Option<OneOrMany<PlaceAnswerSources>>,
}

/// The API documents a single object here; older payloads used a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Many(items) => items,
            Self::One(item) => std::slice::from_ref(item),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaceAnswerSources {
    #[serde(default)]
    pub review_snippets: Vec<ReviewSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewSnippet {
    #[serde(default, alias = "googleMapsUri")]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Citations of the first candidate in document order
    ///
    /// Each chunk contributes its web link, its maps link and then every
    /// review snippet link, skipping entries without a URI.
    pub fn sources(&self) -> Vec<SourceLink> {
        let Some(metadata) = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
        else {
            return Vec::new();
        };

        let mut sources = Vec::new();
        for chunk in &metadata.grounding_chunks {
            if let Some(web) = &chunk.web {
                if let Some(uri) = &web.uri {
                    sources.push(SourceLink {
                        uri: uri.clone(),
                        title: web.title.clone(),
                    });
                }
            }

            let Some(maps) = &chunk.maps else {
                continue;
            };
            if let Some(uri) = &maps.uri {
                sources.push(SourceLink {
                    uri: uri.clone(),
                    title: maps.title.clone(),
                });
            }
            let place_sources = maps
                .place_answer_sources
                .as_ref()
                .map_or(&[][..], OneOrMany::as_slice);
            for snippet in place_sources.iter().flat_map(|s| &s.review_snippets) {
                if let Some(uri) = &snippet.uri {
                    sources.push(SourceLink {
                        uri: uri.clone(),
                        title: Some(
                            snippet
                                .title
                                .clone()
                                .filter(|t| !t.is_empty())
                                .unwrap_or_else(|| REVIEW_SOURCE_TITLE.to_string()),
                        ),
                    });
                }
            }
        }
        sources
    }
}
