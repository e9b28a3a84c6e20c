//! Fixed instructions and output schema sent with every extraction request.

use schemars::schema_for;
use serde_json::Value;

use crate::types::AddressCandidate;

pub(crate) const SCHEMA_NAME: &str = "address_schema";

/// Instructions for the first pass over the JSON ad record.
pub(crate) const AD_RECORD_INSTRUCTIONS: &str = "You receive the JSON record of a rental \
listing returned by a classifieds API. The content is written in French. Work out the street \
address of the property from it. If the description names nearby points of interest (stations, \
parks, monuments, shops), list them in pointOfInterests, most specific first. If nothing more \
precise than a postal code can be derived, return an empty string as the address.";

/// Instructions for the second pass over the scraped listing HTML.
pub(crate) const AD_SOURCE_INSTRUCTIONS: &str = "You receive the HTML of a rental listing page. \
The content is written in French. Using only the human-readable description of the property, \
work out its street address. Ignore anything about the website itself and about the person or \
agency publishing the listing, even when it includes an address. If the description names nearby \
points of interest, list them in pointOfInterests, most specific first. If nothing more precise \
than a postal code can be derived, return an empty string as the address.";

/// JSON schema the model output is constrained to, derived from
/// [`AddressCandidate`]. Strict mode rejects unknown keys and the
/// `$schema`/`title` metadata.
pub(crate) fn address_schema() -> Value {
    let mut schema = serde_json::to_value(schema_for!(AddressCandidate)).unwrap_or_default();
    if let Value::Object(map) = &mut schema {
        map.remove("$schema");
        map.remove("title");
        map.remove("description");
        map.insert("additionalProperties".to_owned(), Value::Bool(false));
    }
    schema
}
