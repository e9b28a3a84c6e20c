use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured output of one extraction pass.
///
/// `address` is empty when nothing more precise than a postal code could be
/// derived. `points_of_interest` is ordered by the model's confidence and is
/// consumed front to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AddressCandidate {
    #[schemars(description = "The address of the property")]
    pub address: String,
    #[serde(rename = "pointOfInterests")]
    #[schemars(description = "The points of interest near the property")]
    pub points_of_interest: Vec<String>,
}

impl AddressCandidate {
    /// The extracted address, if the model produced a non-blank one.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        Some(self.address.trim()).filter(|a| !a.is_empty())
    }

    /// The first non-blank point-of-interest name.
    #[must_use]
    pub fn first_point_of_interest(&self) -> Option<&str> {
        self.points_of_interest
            .first()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_schema_field_names() {
        let candidate: AddressCandidate = serde_json::from_str(
            r#"{"address":"10 Rue de Rivoli, Paris","pointOfInterests":["Hôtel de Ville"]}"#,
        )
        .unwrap();
        assert_eq!(candidate.address(), Some("10 Rue de Rivoli, Paris"));
        assert_eq!(candidate.first_point_of_interest(), Some("Hôtel de Ville"));
    }

    #[test]
    fn blank_address_is_absent() {
        let candidate = AddressCandidate {
            address: "  ".to_owned(),
            points_of_interest: vec!["Tour Eiffel".to_owned()],
        };
        assert_eq!(candidate.address(), None);
        assert_eq!(candidate.first_point_of_interest(), Some("Tour Eiffel"));
    }

    #[test]
    fn empty_point_of_interest_list_is_absent() {
        let candidate = AddressCandidate {
            address: String::new(),
            points_of_interest: Vec::new(),
        };
        assert_eq!(candidate.first_point_of_interest(), None);
    }
}
