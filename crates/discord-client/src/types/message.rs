//! Types for creating channel messages.

use serde::{Deserialize, Serialize};

/// Message flag that delivers without a push notification.
pub const SUPPRESS_NOTIFICATIONS: u64 = 1 << 12;

/// Embed limits enforced by the API.
pub const EMBED_TITLE_LIMIT: usize = 256;
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
pub const EMBED_FIELD_NAME_LIMIT: usize = 256;
pub const EMBED_FIELD_VALUE_LIMIT: usize = 1024;
pub const EMBED_FIELD_COUNT_LIMIT: usize = 25;
pub const EMBED_FOOTER_LIMIT: usize = 2048;

/// Parameters for creating a message.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMessage {
    /// Plain text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Rich embeds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,

    /// Metadata for uploaded files.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,

    /// Message flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl CreateMessage {
    /// Create a message with a single embed.
    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Default::default()
        }
    }

    /// Create a plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Deliver without a push notification.
    pub fn silent(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or(0) | SUPPRESS_NOTIFICATIONS);
        self
    }

    /// Declare an uploaded file, referenced by its position in the upload.
    pub fn with_attachment(mut self, filename: impl Into<String>) -> Self {
        let id = self.attachments.len() as u64;
        self.attachments.push(AttachmentRef {
            id,
            filename: filename.into(),
        });
        self
    }

    /// Check if the silent flag is set.
    pub fn is_silent(&self) -> bool {
        self.flags
            .is_some_and(|flags| flags & SUPPRESS_NOTIFICATIONS != 0)
    }
}

/// A rich embed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedFieldParam>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

impl Embed {
    /// Create an embed with a title and color.
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: Some(title.into()),
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.is_empty() {
            self.description = Some(description);
        }
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedFieldParam {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    /// Show an uploaded file as the thumbnail.
    pub fn with_attachment_thumbnail(mut self, filename: &str) -> Self {
        self.thumbnail = Some(EmbedImage {
            url: format!("attachment://{}", filename),
        });
        self
    }

    /// Trim every part of the embed to the API limits.
    pub fn clamped(mut self) -> Self {
        self.title = self.title.map(|t| clamp(&t, EMBED_TITLE_LIMIT));
        self.description = self
            .description
            .map(|d| clamp(&d, EMBED_DESCRIPTION_LIMIT));
        self.fields.truncate(EMBED_FIELD_COUNT_LIMIT);
        for field in &mut self.fields {
            field.name = clamp(&field.name, EMBED_FIELD_NAME_LIMIT);
            field.value = clamp(&field.value, EMBED_FIELD_VALUE_LIMIT);
            if field.value.is_empty() {
                // Empty field values are rejected by the API
                field.value = "\u{200b}".to_string();
            }
        }
        if let Some(footer) = &mut self.footer {
            footer.text = clamp(&footer.text, EMBED_FOOTER_LIMIT);
        }
        self
    }
}

/// One embed field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedFieldParam {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// Embed image reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedImage {
    pub url: String,
}

/// Embed footer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Metadata for an uploaded file.
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentRef {
    pub id: u64,
    pub filename: String,
}

/// A file to upload alongside a message.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl FileUpload {
    /// A PNG image.
    pub fn png(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            content_type: "image/png".to_string(),
        }
    }
}

/// A created message, as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// The authenticated bot user.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub retry_after: Option<f64>,
}

fn clamp(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_flag() {
        let msg = CreateMessage::text("hi");
        assert!(!msg.is_silent());
        let msg = msg.silent();
        assert!(msg.is_silent());
        assert_eq!(msg.flags, Some(4096));
    }

    #[test]
    fn test_attachment_ids_are_positional() {
        let msg = CreateMessage::text("hi")
            .with_attachment("a.png")
            .with_attachment("b.png");
        assert_eq!(msg.attachments[0].id, 0);
        assert_eq!(msg.attachments[1].id, 1);
    }

    #[test]
    fn test_clamped_limits() {
        let mut embed = Embed::new("t".repeat(300), 0).with_field("n", "", true);
        for i in 0..30 {
            embed = embed.with_field(format!("f{}", i), "v".repeat(2000), false);
        }
        let embed = embed.clamped();
        assert_eq!(embed.title.as_ref().unwrap().chars().count(), EMBED_TITLE_LIMIT);
        assert_eq!(embed.fields.len(), EMBED_FIELD_COUNT_LIMIT);
        assert_eq!(embed.fields[0].value, "\u{200b}");
        assert_eq!(
            embed.fields[1].value.chars().count(),
            EMBED_FIELD_VALUE_LIMIT
        );
    }

    #[test]
    fn test_empty_description_is_omitted() {
        let embed = Embed::new("t", 0).with_description("");
        let json = serde_json::to_value(&embed).unwrap();
        assert!(json.get("description").is_none());
    }
}
