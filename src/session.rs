//! Session fields from decoded QR text

use url::Url;

use crate::models::ClassId;

/// Query parameter carrying the class identifier
pub const CLASS_PARAM: &str = "class";

/// Extract the `class` query parameter from decoded text
///
/// Never fails: text that is not an absolute URL, or a URL without a
/// non-empty `class` value, yields [`ClassId::Unknown`]. When the parameter
/// repeats, the first non-empty value wins.
pub fn parse_class_id(text: &str) -> ClassId {
    let Ok(url) = Url::parse(text.trim()) else {
        return ClassId::Unknown;
    };

    url.query_pairs()
        .filter(|(key, _)| key == CLASS_PARAM)
        .map(|(_, value)| value.into_owned())
        .find(|value| !value.is_empty())
        .map(ClassId::Known)
        .unwrap_or(ClassId::Unknown)
}
