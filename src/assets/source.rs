use std::{borrow::Cow, path::PathBuf};

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{PhotoframeError, PhotoframeResult};

/// Raw image input handed to the loader.
///
/// The loader sniffs the container format from the decoded bytes; a MIME type declared in a data
/// URL is informational only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes held in memory.
    Bytes(Vec<u8>),
    /// An embedded-data string: `data:<mime>;base64,<payload>`.
    DataUrl(String),
    /// A local file, read fully into memory before decoding.
    Path(PathBuf),
}

impl ImageSource {
    /// Wrap encoded bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// Wrap an embedded-data string.
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self::DataUrl(url.into())
    }

    /// Wrap a local file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Encode `bytes` as a base64 data URL with the given MIME type.
    pub fn data_url_from_bytes(bytes: &[u8], mime: &str) -> Self {
        Self::DataUrl(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
    }

    /// An empty source stands for "no image" rather than a decode failure.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bytes(b) => b.is_empty(),
            Self::DataUrl(s) => s.trim().is_empty(),
            Self::Path(p) => p.as_os_str().is_empty(),
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::DataUrl(_) => "data-url",
            Self::Path(_) => "path",
        }
    }

    /// Resolve to encoded image bytes without decoding them.
    pub fn encoded_bytes(&self) -> PhotoframeResult<Cow<'_, [u8]>> {
        self.read_encoded()
            .map_err(|err| PhotoframeError::decode(format!("{err:#}")))
    }

    fn read_encoded(&self) -> anyhow::Result<Cow<'_, [u8]>> {
        match self {
            Self::Bytes(b) => Ok(Cow::Borrowed(b.as_slice())),
            Self::DataUrl(url) => {
                let data = decode_data_url(url)?;
                tracing::trace!(mime = %data.mime, len = data.payload.len(), "parsed data URL");
                Ok(Cow::Owned(data.payload))
            }
            Self::Path(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("read image file '{}'", path.display()))?;
                Ok(Cow::Owned(bytes))
            }
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// A parsed `data:` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DataUrl {
    /// Declared media type, lowercased; empty when omitted.
    pub(crate) mime: String,
    /// Decoded payload.
    pub(crate) payload: Vec<u8>,
}

/// Parse a base64 `data:` URL.
///
/// Percent-encoded (non-base64) payloads are rejected: browsers only hand out base64 for binary
/// image data.
pub(crate) fn decode_data_url(url: &str) -> anyhow::Result<DataUrl> {
    let url = url.trim();
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| anyhow::anyhow!("not a data URL (missing 'data:' scheme)"))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("data URL has no ',' separator"))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));
    if !is_base64 {
        anyhow::bail!("only base64 data URLs are supported");
    }

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let payload = STANDARD
        .decode(compact.as_bytes())
        .context("decode base64 data URL payload")?;

    Ok(DataUrl { mime, payload })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
