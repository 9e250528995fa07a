//! Generated clip metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default duration for the first example clip when `clip_length` is "auto".
pub const DEFAULT_CLIP_SECONDS: f64 = 30.0;

/// Fixed duration of the second example clip.
pub const SECOND_CLIP_SECONDS: f64 = 20.0;

const FIRST_CAPTION: &str = "Top moment with highest energy";
const FIRST_THUMBNAIL_URL: &str =
    "https://images.unsplash.com/photo-1504384308090-c894fdcc538d?q=80&w=1280&auto=format&fit=crop";
const FIRST_DOWNLOAD_URL: &str =
    "https://file-examples.com/storage/fe0e7a8f6e2a6a5ef2d3b5f/2017/04/file_example_MP4_480_1_5MG.mp4";

const SECOND_CAPTION: &str = "Funny reaction with clean transcript";
const SECOND_THUMBNAIL_URL: &str =
    "https://images.unsplash.com/photo-1524253482453-3fed8d2fe12b?q=80&w=1280&auto=format&fit=crop";
const SECOND_DOWNLOAD_URL: &str =
    "https://file-examples.com/storage/fe0e7a8f6e2a6a5ef2d3b5f/2017/04/file_example_MP4_1280_10MG.mp4";

/// A generated clip. Immutable once materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// Caption text
    pub caption: String,

    /// Duration in seconds
    pub duration: f64,

    /// Aspect ratio label (mirrors the job setting)
    pub aspect_ratio: String,

    /// Thumbnail image URL
    pub thumbnail_url: String,

    /// Downloadable clip URL
    pub download_url: String,
}

impl Clip {
    /// Materialize the two fixed example clips for a completed job.
    ///
    /// The first clip's duration honors the job's `clip_length` when it is a
    /// numeric string; "auto" and unparseable values fall back to the
    /// default. Both clips mirror the job's aspect ratio setting.
    pub fn examples(clip_length: &str, aspect_ratio: &str) -> Vec<Clip> {
        vec![
            Clip {
                caption: FIRST_CAPTION.to_string(),
                duration: requested_duration(clip_length),
                aspect_ratio: aspect_ratio.to_string(),
                thumbnail_url: FIRST_THUMBNAIL_URL.to_string(),
                download_url: FIRST_DOWNLOAD_URL.to_string(),
            },
            Clip {
                caption: SECOND_CAPTION.to_string(),
                duration: SECOND_CLIP_SECONDS,
                aspect_ratio: aspect_ratio.to_string(),
                thumbnail_url: SECOND_THUMBNAIL_URL.to_string(),
                download_url: SECOND_DOWNLOAD_URL.to_string(),
            },
        ]
    }
}

fn requested_duration(clip_length: &str) -> f64 {
    if clip_length == "auto" {
        return DEFAULT_CLIP_SECONDS;
    }
    clip_length.parse().unwrap_or(DEFAULT_CLIP_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_default_duration() {
        let clips = Clip::examples("auto", "auto");
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].duration, DEFAULT_CLIP_SECONDS);
        assert_eq!(clips[1].duration, SECOND_CLIP_SECONDS);
    }

    #[test]
    fn test_examples_honor_clip_length() {
        let clips = Clip::examples("45", "9:16");
        assert_eq!(clips[0].duration, 45.0);
        // Second clip duration is fixed regardless of the request
        assert_eq!(clips[1].duration, SECOND_CLIP_SECONDS);
    }

    #[test]
    fn test_examples_mirror_aspect_ratio() {
        let clips = Clip::examples("auto", "1:1");
        assert!(clips.iter().all(|c| c.aspect_ratio == "1:1"));
    }

    #[test]
    fn test_unparseable_clip_length_falls_back() {
        let clips = Clip::examples("long", "auto");
        assert_eq!(clips[0].duration, DEFAULT_CLIP_SECONDS);
    }
}
