// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors
//! Phosphor icon mapping for selected media files.
//!
//! MIME type wins; the extension of the file name is only consulted to pick
//! a more specific image glyph or when the MIME type is missing.

/// Return a Phosphor file icon matching the MIME type or file name.
pub fn icon_for(mime: &str, name: &str) -> &'static str {
    let mime = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if mime.starts_with("image/") || is_image_ext(&ext) {
        return match ext.as_str() {
            "png" => egui_phosphor::regular::FILE_PNG,
            "jpg" | "jpeg" => egui_phosphor::regular::FILE_JPG,
            "svg" => egui_phosphor::regular::FILE_SVG,
            _ => egui_phosphor::regular::FILE_IMAGE,
        };
    }
    if mime.starts_with("video/") || is_video_ext(&ext) {
        return egui_phosphor::regular::FILE_VIDEO;
    }

    egui_phosphor::regular::FILE
}

fn is_image_ext(ext: &str) -> bool {
    matches!(
        ext,
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tif" | "tiff" | "avif" | "heic" | "svg"
    )
}

fn is_video_ext(ext: &str) -> bool {
    matches!(
        ext,
        "mp4" | "m4v" | "mov" | "webm" | "mkv" | "avi" | "wmv" | "3gp" | "mpeg" | "mpg"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_selects_icon() {
        assert_eq!(icon_for("image/png", "a.png"), egui_phosphor::regular::FILE_PNG);
        assert_eq!(icon_for("image/webp", "a.webp"), egui_phosphor::regular::FILE_IMAGE);
        assert_eq!(icon_for("video/mp4; codecs=avc1", "clip"), egui_phosphor::regular::FILE_VIDEO);
    }

    #[test]
    fn extension_is_fallback_without_mime() {
        assert_eq!(icon_for("", "Shot.JPG"), egui_phosphor::regular::FILE_JPG);
        assert_eq!(icon_for("", "clip.mov"), egui_phosphor::regular::FILE_VIDEO);
        assert_eq!(icon_for("application/pdf", "doc.pdf"), egui_phosphor::regular::FILE);
    }
}
