//! Hidden file handling: reading the payload and naming the recovered file.

use crate::codec::Tag;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Read a payload file. The tag comes from its extension.
pub fn read_payload(path: &Path) -> Result<(Vec<u8>, Tag)> {
    let tag = Tag::from_path(path)?;
    let bytes = std::fs::read(path)?;
    Ok((bytes, tag))
}

/// Default output path for a carrier with a payload hidden in it.
pub fn encoded_output_path(carrier_path: &Path) -> PathBuf {
    let stem = carrier_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    carrier_path.with_file_name(format!("{}_encoded.wav", stem))
}

/// Default output path for a payload recovered from `carrier_path`.
///
/// The file lands next to the carrier. An `encoded` in the carrier's stem
/// becomes `decoded`, otherwise `_decoded` is appended. The tag is the
/// extension.
pub fn decoded_output_path(carrier_path: &Path, tag: &Tag) -> PathBuf {
    let stem = carrier_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = if stem.contains("encoded") {
        stem.replace("encoded", "decoded")
    } else {
        format!("{}_decoded", stem)
    };

    let dir = carrier_path.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{}.{}", name, sanitize_extension(tag)))
}

/// Tag bytes usable in a file name; anything else becomes `_`.
fn sanitize_extension(tag: &Tag) -> String {
    tag.as_bytes()
        .iter()
        .map(|&b| {
            if b.is_ascii_alphanumeric() {
                char::from(b)
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_payload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emoji.PNG");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let (bytes, tag) = read_payload(&path).unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(tag.to_string(), "png");
    }

    #[test]
    fn test_read_payload_bad_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpeg");
        std::fs::write(&path, b"x").unwrap();

        assert!(read_payload(&path).is_err());
    }

    #[test]
    fn test_encoded_output_path() {
        let path = encoded_output_path(Path::new("/music/song.wav"));
        assert_eq!(path, PathBuf::from("/music/song_encoded.wav"));
        assert_eq!(
            decoded_output_path(&path, &"png".parse().unwrap()),
            PathBuf::from("/music/song_decoded.png")
        );
    }

    #[test]
    fn test_encoded_becomes_decoded() {
        let tag: Tag = "png".parse().unwrap();
        let path = decoded_output_path(Path::new("/music/song_encoded.wav"), &tag);
        assert_eq!(path, PathBuf::from("/music/song_decoded.png"));
    }

    #[test]
    fn test_plain_name_gets_suffix() {
        let tag: Tag = "bmp".parse().unwrap();
        let path = decoded_output_path(Path::new("carrier.wav"), &tag);
        assert_eq!(path, PathBuf::from("carrier_decoded.bmp"));
    }

    #[test]
    fn test_garbage_tag_is_sanitized() {
        let tag = Tag::from_bytes([0x00, b'/', b'a']);
        let path = decoded_output_path(Path::new("/tmp/x.wav"), &tag);
        assert_eq!(path, PathBuf::from("/tmp/x_decoded.__a"));
    }
}
