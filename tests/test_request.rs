use courier::http::mime::FileType;
use courier::http::request::{IncomingRequest, RequestKind};

fn request(raw_path: &str) -> IncomingRequest {
    IncomingRequest {
        method: "GET".to_string(),
        raw_path: raw_path.to_string(),
        header_lines: Vec::new(),
    }
}

#[test]
fn test_empty_path_is_server_info() {
    assert_eq!(request("").classify(), RequestKind::ServerInfo);
}

#[test]
fn test_directory_path_is_server_info() {
    assert_eq!(request("media/").classify(), RequestKind::ServerInfo);
    assert_eq!(request("a/b/c/").classify(), RequestKind::ServerInfo);
}

#[test]
fn test_query_string_is_text() {
    assert_eq!(
        request("?foo=bar&baz=qux").classify(),
        RequestKind::Text("?foo=bar&baz=qux".to_string())
    );
}

#[test]
fn test_supported_extension_is_media() {
    assert_eq!(
        request("/storage/pics/img.jpg").classify(),
        RequestKind::Media {
            path: "/storage/pics/img.jpg".to_string(),
            file_type: FileType::Jpeg,
        }
    );
}

#[test]
fn test_extension_match_is_case_insensitive() {
    assert_eq!(
        request("MOVIE.MP4").classify(),
        RequestKind::Media {
            path: "MOVIE.MP4".to_string(),
            file_type: FileType::Mp4,
        }
    );
}

#[test]
fn test_unknown_extension_is_text() {
    assert_eq!(
        request("notes.doc").classify(),
        RequestKind::Text("notes.doc".to_string())
    );
}

#[test]
fn test_path_without_dot_is_text() {
    assert_eq!(
        request("some/text/message").classify(),
        RequestKind::Text("some/text/message".to_string())
    );
}

#[test]
fn test_dot_in_directory_name_is_text() {
    // the extension is taken after the last dot of the whole string
    assert_eq!(
        request("dir.d/file").classify(),
        RequestKind::Text("dir.d/file".to_string())
    );
}

#[test]
fn test_percent_decoding_applies_before_extension_check() {
    assert_eq!(
        request("IMG%20001.jpg").classify(),
        RequestKind::Media {
            path: "IMG 001.jpg".to_string(),
            file_type: FileType::Jpeg,
        }
    );
}

#[test]
fn test_plus_decodes_to_space() {
    assert_eq!(
        request("my+holiday+clip.mp4").classify(),
        RequestKind::Media {
            path: "my holiday clip.mp4".to_string(),
            file_type: FileType::Mp4,
        }
    );
}

#[test]
fn test_encoded_plus_stays_a_plus() {
    assert_eq!(
        request("a%2Bb.txt").classify(),
        RequestKind::Media {
            path: "a+b.txt".to_string(),
            file_type: FileType::Txt,
        }
    );
}

#[test]
fn test_encoded_query_marker_is_text() {
    assert_eq!(
        request("%3Ffoo=bar").classify(),
        RequestKind::Text("?foo=bar".to_string())
    );
}
