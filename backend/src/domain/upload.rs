//! Avatar upload acceptance policy.
//!
//! The policy is checked against the declared MIME type and size before any
//! byte is durably stored; the transport layer additionally caps the
//! streamed body so a lying declaration cannot exceed the limit either.

use thiserror::Error as ThisError;

use super::error::{Error, FieldErrors};

/// Largest accepted avatar asset, in bytes (2 MiB).
pub const AVATAR_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Reasons an upload is refused before storage.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum UploadRejection {
    /// The declared size exceeds [`AVATAR_MAX_BYTES`].
    #[error("Файл завеликий (максимум 2 МБ)")]
    TooLarge {
        /// Size the client declared, in bytes.
        declared: usize,
    },
    /// The declared MIME type is not an image type.
    #[error("Дозволені лише зображення (jpg, png)")]
    NotAnImage {
        /// MIME type the client declared.
        mime: String,
    },
}

impl From<UploadRejection> for Error {
    fn from(rejection: UploadRejection) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert("avatar".to_owned(), rejection.to_string());
        Self::validation(fields)
    }
}

/// Check the declared properties of an avatar upload.
///
/// # Errors
/// Returns [`UploadRejection`] when the declared size exceeds the limit or
/// the declared MIME type is not `image/*`.
pub fn check_avatar(declared_mime: &str, declared_size: usize) -> Result<(), UploadRejection> {
    if declared_size > AVATAR_MAX_BYTES {
        return Err(UploadRejection::TooLarge {
            declared: declared_size,
        });
    }
    if !is_image(declared_mime) {
        return Err(UploadRejection::NotAnImage {
            mime: declared_mime.to_owned(),
        });
    }
    Ok(())
}

/// File extension for a stored asset, derived from the image subtype.
///
/// Unknown or exotic subtypes collapse to `img` so asset names stay
/// predictable and shell-safe.
pub fn extension_for(mime: &str) -> &'static str {
    match mime.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        _ => "img",
    }
}

fn is_image(mime: &str) -> bool {
    mime.trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("image/png", 1024)]
    #[case("image/jpeg", AVATAR_MAX_BYTES)]
    #[case("IMAGE/PNG", 1)]
    fn images_within_the_limit_pass(#[case] mime: &str, #[case] size: usize) {
        assert!(check_avatar(mime, size).is_ok());
    }

    #[rstest]
    fn oversized_declarations_are_rejected_before_storage() {
        let err = check_avatar("image/png", AVATAR_MAX_BYTES + 1).expect_err("too large");
        assert!(matches!(err, UploadRejection::TooLarge { .. }));
    }

    #[rstest]
    #[case("application/pdf")]
    #[case("text/html")]
    #[case("image/")]
    #[case("")]
    fn non_image_declarations_are_rejected(#[case] mime: &str) {
        let err = check_avatar(mime, 10).expect_err("not an image");
        assert!(matches!(err, UploadRejection::NotAnImage { .. }));
    }

    #[rstest]
    fn rejection_maps_to_a_validation_error_on_the_avatar_field() {
        let error: Error = UploadRejection::NotAnImage {
            mime: "text/plain".to_owned(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let fields = error.field_errors().expect("field map present");
        assert!(fields.contains_key("avatar"));
    }

    #[rstest]
    #[case("image/jpeg", "jpg")]
    #[case("image/png", "png")]
    #[case("image/x-icon", "img")]
    fn extensions_follow_the_subtype(#[case] mime: &str, #[case] expected: &str) {
        assert_eq!(extension_for(mime), expected);
    }
}
