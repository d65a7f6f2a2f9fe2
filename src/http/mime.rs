//! Supported file types and MIME lookup.
//!
//! Only a fixed whitelist of extensions is served as media; anything else is
//! treated as a text message to the host application.

/// File types the server will stream, keyed by extension.
///
/// Mostly matches what Android devices record and play back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
    Mp3,
    Ogg,
    M4a,
    Aac,
    ThreeGp,
    Mp4,
    Mkv,
    Webm,
    Txt,
}

impl FileType {
    /// Look up a file type from an extension, case-insensitively.
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(FileType::Jpeg),
            "png" => Some(FileType::Png),
            "gif" => Some(FileType::Gif),
            "bmp" => Some(FileType::Bmp),
            "webp" => Some(FileType::Webp),
            "mp3" => Some(FileType::Mp3),
            "ogg" => Some(FileType::Ogg),
            "m4a" => Some(FileType::M4a),
            "aac" => Some(FileType::Aac),
            "3gp" => Some(FileType::ThreeGp),
            "mp4" => Some(FileType::Mp4),
            "mkv" => Some(FileType::Mkv),
            "webm" => Some(FileType::Webm),
            "txt" => Some(FileType::Txt),
            _ => None,
        }
    }

    /// Look up a file type from a request path.
    ///
    /// The extension is whatever follows the last `.` in the whole string;
    /// paths without a dot have no type.
    pub fn from_path(path: &str) -> Option<Self> {
        let idx = path.rfind('.')?;
        Self::from_ext(&path[idx + 1..])
    }

    /// Content-Type header value for this file type.
    pub fn content_type(self) -> &'static str {
        match self {
            FileType::Jpeg => "image/jpeg",
            FileType::Png => "image/png",
            FileType::Gif => "image/gif",
            FileType::Bmp => "image/bmp",
            FileType::Webp => "image/webp",
            FileType::Mp3 => "audio/mpeg",
            FileType::Ogg => "audio/ogg",
            FileType::M4a => "audio/mp4",
            FileType::Aac => "audio/aac",
            FileType::ThreeGp => "video/3gpp",
            FileType::Mp4 => "video/mp4",
            FileType::Mkv => "video/x-matroska",
            FileType::Webm => "video/webm",
            FileType::Txt => "text/plain; charset=utf-8",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(FileType::from_ext("JPG"), Some(FileType::Jpeg));
        assert_eq!(FileType::from_ext("Mp4"), Some(FileType::Mp4));
        assert_eq!(FileType::from_ext("3GP"), Some(FileType::ThreeGp));
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        assert_eq!(FileType::from_ext("exe"), None);
        assert_eq!(FileType::from_ext(""), None);
    }

    #[test]
    fn path_extension_is_after_last_dot() {
        assert_eq!(FileType::from_path("a/b/c.tar.mp4"), Some(FileType::Mp4));
        assert_eq!(FileType::from_path("no_extension"), None);
        // the "extension" here spans a separator, so it matches nothing
        assert_eq!(FileType::from_path("dir.d/file"), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(FileType::Jpeg.content_type(), "image/jpeg");
        assert_eq!(FileType::ThreeGp.content_type(), "video/3gpp");
        assert_eq!(FileType::Txt.content_type(), "text/plain; charset=utf-8");
    }
}
