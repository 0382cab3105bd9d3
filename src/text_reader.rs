use crate::error::ParseError;
use crate::reader::TextExtractor;
use log::warn;

/// Plain text and Markdown are taken as-is; headings are detected later.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(
                    "Manuscript is not valid UTF-8 (at byte {}), replacing invalid sequences",
                    err.utf8_error().valid_up_to()
                );
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}
