//! Embedded image extraction.
//!
//! Notes exports inline their images as `data:` URIs on `img` tags. The
//! converter decodes those into byte buffers for a later upload step; it
//! never touches the network or the filesystem here. Anything that fails
//! to match or decode is skipped with a warning so one bad image cannot
//! sink the document.

use std::rc::Rc;
use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose};
use markup5ever_rcdom::Node;
use regex::Regex;

use super::Context;
use super::text::attr_value;

static IMG_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^data:image/([^;]+);([^,]+),(.+)$").expect("image data URI pattern is valid")
});

/// One image decoded out of a data URI, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Subtype from the URI, e.g. `png` or `jpeg`.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

pub(super) fn handle(node: &Rc<Node>, ctx: &mut Context) {
    log::debug!("processing image");
    let Some(src) = attr_value(node, "src") else {
        log::warn!("img element without src attribute");
        return;
    };
    if let Some(image) = decode_data_uri(&src) {
        ctx.images.push(image);
    }
}

/// Decode `data:image/<type>;<encoding>,<payload>` into an [`InlineImage`].
/// Returns `None` (after logging) for non-matching sources, encodings other
/// than base64, and corrupt payloads.
pub fn decode_data_uri(src: &str) -> Option<InlineImage> {
    let Some(caps) = IMG_DATA_RE.captures(src) else {
        log::warn!("unsupported image in note");
        return None;
    };

    let media_type = &caps[1];
    let encoding = &caps[2];
    let payload = &caps[3];
    log::debug!("found embedded image: {} [{}]", media_type, encoding);

    if encoding != "base64" {
        log::warn!("unsupported img encoding: {}", encoding);
        return None;
    }

    log::debug!("decoding base64 image: {} bytes", payload.len());
    match general_purpose::STANDARD.decode(payload) {
        Ok(bytes) => Some(InlineImage {
            media_type: media_type.to_string(),
            bytes,
        }),
        Err(err) => {
            log::warn!("discarding undecodable image payload: {}", err);
            None
        }
    }
}
