//! Apartment listing types

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Server-assigned apartment identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApartmentId(String);

impl ApartmentId {
    /// Parse an identifier supplied by a user or a route.
    ///
    /// Rejects empty values and values that would not survive as a single
    /// URL path segment. `.` and `..` are dot segments and would resolve to
    /// a different resource.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || matches!(trimmed, "." | "..")
            || trimmed.contains(['/', '?', '#'])
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(TypesError::InvalidApartmentId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApartmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ApartmentId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ApartmentId> for String {
    fn from(id: ApartmentId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ApartmentId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Apartment listing as returned by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    /// Server-assigned identifier
    pub id: ApartmentId,
    /// Listing title
    pub title: String,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// Surface area in square meters
    #[serde(default)]
    pub surface: Option<f64>,
    /// Number of rooms
    #[serde(default)]
    pub rooms: Option<f64>,
    /// Nightly price
    #[serde(default)]
    pub price_per_night: Option<f64>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image reference
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Create/update payload sent to the remote API.
///
/// Always built through [`ApartmentDraft::new`] or [`ApartmentDraft::from_form`],
/// so the title is never blank and every number is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentDraft {
    title: String,
    address: Option<String>,
    surface: Option<f64>,
    rooms: Option<f64>,
    price_per_night: Option<f64>,
    description: Option<String>,
    image_url: Option<String>,
}

impl ApartmentDraft {
    /// Create a draft with only a title
    pub fn new(title: &str) -> Result<Self, TypesError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TypesError::TitleRequired);
        }
        Ok(Self {
            title: title.to_string(),
            address: None,
            surface: None,
            rooms: None,
            price_per_night: None,
            description: None,
            image_url: None,
        })
    }

    /// Build a draft from raw form input.
    ///
    /// Text is trimmed and blank text becomes absent. Numbers that are blank,
    /// unparseable or not finite become absent.
    pub fn from_form(form: &ApartmentForm) -> Result<Self, TypesError> {
        let mut draft = Self::new(&form.title)?;
        draft.address = non_blank(&form.address);
        draft.surface = parse_number(&form.surface);
        draft.rooms = parse_number(&form.rooms);
        draft.price_per_night = parse_number(&form.price_per_night);
        draft.description = non_blank(&form.description);
        draft.image_url = non_blank(&form.image_url);
        Ok(draft)
    }

    /// Trimmed title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Address, if any
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Surface area, if any
    pub fn surface(&self) -> Option<f64> {
        self.surface
    }

    /// Room count, if any
    pub fn rooms(&self) -> Option<f64> {
        self.rooms
    }

    /// Nightly price, if any
    pub fn price_per_night(&self) -> Option<f64> {
        self.price_per_night
    }

    /// Description, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Image reference, if any
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Raw, unvalidated form fields for creating or editing an apartment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApartmentForm {
    pub title: String,
    pub address: String,
    pub surface: String,
    pub rooms: String,
    pub price_per_night: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Apartment> for ApartmentForm {
    /// Prefill an edit form from an existing listing
    fn from(apartment: &Apartment) -> Self {
        let number = |n: Option<f64>| n.map(|v| v.to_string()).unwrap_or_default();
        Self {
            title: apartment.title.clone(),
            address: apartment.address.clone().unwrap_or_default(),
            surface: number(apartment.surface),
            rooms: number(apartment.rooms),
            price_per_night: number(apartment.price_per_night),
            description: apartment.description.clone().unwrap_or_default(),
            image_url: apartment.image_url.clone().unwrap_or_default(),
        }
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str) -> ApartmentForm {
        ApartmentForm {
            title: title.to_string(),
            ..ApartmentForm::default()
        }
    }

    #[test]
    fn test_apartment_id_parse() {
        assert_eq!(ApartmentId::parse(" abc-1 ").unwrap().as_str(), "abc-1");
        assert!(ApartmentId::parse("").is_err());
        assert!(ApartmentId::parse("   ").is_err());
        assert!(ApartmentId::parse("a/b").is_err());
        assert!(ApartmentId::parse("a b").is_err());
    }

    #[test]
    fn test_apartment_id_rejects_dot_segments() {
        assert!(ApartmentId::parse(".").is_err());
        assert!(ApartmentId::parse(" .. ").is_err());
        assert_eq!(ApartmentId::parse("...").unwrap().as_str(), "...");
        assert_eq!(ApartmentId::parse(".hidden").unwrap().as_str(), ".hidden");

        let from_server: Result<ApartmentId, _> = serde_json::from_str(r#"".." "#);
        assert!(from_server.is_err());
        assert_eq!(serde_json::to_string(&ApartmentId::parse("7").unwrap()).unwrap(), r#""7""#);
    }

    #[test]
    fn test_apartment_deserializes_nulls_and_missing_fields() {
        let json = r#"{"id":"42","title":"Loft","address":null,"surface":92.5}"#;
        let apt: Apartment = serde_json::from_str(json).unwrap();

        assert_eq!(apt.id.as_str(), "42");
        assert_eq!(apt.title, "Loft");
        assert_eq!(apt.address, None);
        assert_eq!(apt.surface, Some(92.5));
        assert_eq!(apt.rooms, None);
        assert_eq!(apt.image_url, None);
    }

    #[test]
    fn test_draft_requires_title() {
        assert_eq!(ApartmentDraft::new("   "), Err(TypesError::TitleRequired));
        assert_eq!(
            ApartmentDraft::from_form(&form("\t\n")),
            Err(TypesError::TitleRequired)
        );
        assert_eq!(ApartmentDraft::new("  Loft ").unwrap().title(), "Loft");
    }

    #[test]
    fn test_draft_normalizes_form_fields() {
        let form = ApartmentForm {
            title: " Veloura Residences ".to_string(),
            address: "   ".to_string(),
            surface: " 92 ".to_string(),
            rooms: "three".to_string(),
            price_per_night: "inf".to_string(),
            description: " Bright corner unit ".to_string(),
            image_url: String::new(),
        };

        let draft = ApartmentDraft::from_form(&form).unwrap();
        assert_eq!(draft.title(), "Veloura Residences");
        assert_eq!(draft.address(), None);
        assert_eq!(draft.surface(), Some(92.0));
        assert_eq!(draft.rooms(), None);
        assert_eq!(draft.price_per_night(), None);
        assert_eq!(draft.description(), Some("Bright corner unit"));
        assert_eq!(draft.image_url(), None);
    }

    #[test]
    fn test_draft_serializes_absent_fields_as_null() {
        let draft = ApartmentDraft::new("Loft").unwrap();
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value["title"], "Loft");
        assert!(value["pricePerNight"].is_null());
        assert!(value["imageUrl"].is_null());
    }

    #[test]
    fn test_form_prefill_roundtrip() {
        let apt = Apartment {
            id: ApartmentId::parse("7").unwrap(),
            title: "Loft".to_string(),
            address: Some("Casablanca".to_string()),
            surface: Some(40.0),
            rooms: Some(2.0),
            price_per_night: None,
            description: None,
            image_url: None,
        };

        let form = ApartmentForm::from(&apt);
        assert_eq!(form.surface, "40");
        assert_eq!(form.rooms, "2");
        assert_eq!(form.price_per_night, "");

        let draft = ApartmentDraft::from_form(&form).unwrap();
        assert_eq!(draft.address(), Some("Casablanca"));
        assert_eq!(draft.surface(), Some(40.0));
    }
}
