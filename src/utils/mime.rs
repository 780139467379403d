//! MIME type utilities for stream descriptors

/// A MIME type as reported by the platform, e.g.
/// `video/mp4; codecs="avc1.42001E, mp4a.40.2"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeInfo {
    /// Type and subtype without parameters
    pub essence: String,
    /// Codecs listed in the `codecs` parameter
    pub codecs: Vec<String>,
}

impl MimeInfo {
    /// Parse a MIME string with an optional codecs parameter
    pub fn parse(mime_type: &str) -> Self {
        let mut parts = mime_type.split(';');
        let essence = parts.next().unwrap_or_default().trim().to_lowercase();

        let codecs = parts
            .filter_map(|param| param.trim().strip_prefix("codecs="))
            .flat_map(|list| list.trim_matches('"').split(','))
            .map(|codec| codec.trim().to_string())
            .filter(|codec| !codec.is_empty())
            .collect();

        Self { essence, codecs }
    }

    /// Check if this is an audio MIME type
    pub fn is_audio(&self) -> bool {
        self.essence.starts_with("audio/")
    }

    /// Check if this is a video MIME type
    pub fn is_video(&self) -> bool {
        self.essence.starts_with("video/")
    }

    /// File extension for this MIME type
    pub fn extension(&self) -> &'static str {
        ext_from_mime(&self.essence)
    }
}

/// Get file extension from MIME type
pub fn ext_from_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/3gpp" => "3gp",
        "video/x-flv" => "flv",
        "video/x-matroska" => "mkv",

        "audio/mp4" => "m4a",
        "audio/webm" => "webm",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        "audio/opus" => "opus",

        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_muxed_mime() {
        let info = MimeInfo::parse(r#"video/mp4; codecs="avc1.42001E, mp4a.40.2""#);
        assert_eq!(info.essence, "video/mp4");
        assert_eq!(info.codecs, vec!["avc1.42001E", "mp4a.40.2"]);
        assert!(info.is_video());
        assert_eq!(info.extension(), "mp4");
    }

    #[test]
    fn test_parse_audio_mime() {
        let info = MimeInfo::parse(r#"audio/webm; codecs="opus""#);
        assert_eq!(info.essence, "audio/webm");
        assert_eq!(info.codecs, vec!["opus"]);
        assert!(info.is_audio());
        assert_eq!(info.extension(), "webm");
    }

    #[test]
    fn test_parse_without_codecs() {
        let info = MimeInfo::parse("VIDEO/3GPP");
        assert_eq!(info.essence, "video/3gpp");
        assert!(info.codecs.is_empty());
        assert_eq!(info.extension(), "3gp");
    }

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("audio/mp4"), "m4a");
        assert_eq!(ext_from_mime("audio/mpeg"), "mp3");
        assert_eq!(ext_from_mime("unknown/type"), "bin");
    }
}
