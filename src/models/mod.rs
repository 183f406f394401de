use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod de;

/// Property listing as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Backends may send numeric ids; they are kept in decimal form
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    pub title: String,
    /// Asking price in whole rupees
    #[serde(deserialize_with = "de::whole_number")]
    pub price: i64,
    #[serde(default)]
    pub price_per_sq_ft: f64,
    /// Built-up area in sq. ft.
    #[serde(deserialize_with = "de::whole_number")]
    pub area: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possession_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Backend fields this crate does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Point of interest near a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Distance from the property in km
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{NearbyPlace, Property};

    #[test]
    fn property_keeps_unknown_fields() {
        let raw = json!({
            "id": "p-42",
            "title": "Sea-facing 3BHK",
            "price": 12500000,
            "pricePerSqFt": 9800,
            "area": 1275,
            "images": ["https://cdn.example/p-42/1.jpg"],
            "bedrooms": "3BHK",
            "createdAt": "2024-03-01T10:00:00Z",
            "amenities": ["Gym", "Pool"]
        });

        let property: Property = serde_json::from_value(raw).unwrap();
        assert_eq!(property.price_per_sq_ft, 9800.0);
        assert_eq!(property.bedrooms.as_deref(), Some("3BHK"));
        assert!(property.created_at.is_some());
        assert_eq!(property.extra["amenities"], json!(["Gym", "Pool"]));

        let back = serde_json::to_value(&property).unwrap();
        assert_eq!(back["amenities"], json!(["Gym", "Pool"]));
        assert_eq!(back["pricePerSqFt"], json!(9800.0));
    }

    #[test]
    fn property_tolerates_missing_optional_fields() {
        let property: Property = serde_json::from_value(json!({
            "id": "p-1",
            "title": "Plot",
            "price": 900000,
            "area": 2400
        }))
        .unwrap();

        assert_eq!(property.price_per_sq_ft, 0.0);
        assert!(property.images.is_empty());
        assert!(!property.featured);
        assert!(property.extra.is_empty());
    }

    #[test]
    fn numeric_id_is_kept_as_text() {
        let property: Property = serde_json::from_value(json!({
            "id": 42,
            "title": "Corner shop",
            "price": 3200000,
            "area": 410
        }))
        .unwrap();

        assert_eq!(property.id, "42");
        assert_eq!(serde_json::to_value(&property).unwrap()["id"], "42");
    }

    #[test]
    fn fractional_price_per_sq_ft() {
        let properties: Vec<Property> = serde_json::from_value(json!([
            {"id": "a", "title": "2BHK", "price": 5000000, "pricePerSqFt": 5555.56, "area": 900},
            {"id": "b", "title": "3BHK", "price": 8000000, "pricePerSqFt": 6400, "area": 1250}
        ]))
        .unwrap();

        assert_eq!(properties[0].price_per_sq_ft, 5555.56);
        assert_eq!(properties[1].price_per_sq_ft, 6400.0);
    }

    #[test]
    fn price_and_area_accept_float_encodings() {
        let property: Property = serde_json::from_value(json!({
            "id": "p-9",
            "title": "Villa",
            "price": 25000000.0,
            "area": 2150.4
        }))
        .unwrap();

        assert_eq!(property.price, 25_000_000);
        assert_eq!(property.area, 2150);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let result: Result<Property, _> = serde_json::from_value(json!({
            "id": "p-9",
            "title": "Villa",
            "price": "on request",
            "area": 2150
        }));

        assert!(result.is_err());
    }

    #[test]
    fn nearby_place_type_field() {
        let place: NearbyPlace = serde_json::from_value(json!({
            "name": "City Hospital",
            "type": "hospital",
            "distance": 1.2,
            "latitude": 19.07,
            "longitude": 72.87
        }))
        .unwrap();

        assert_eq!(place.kind, "hospital");
        assert_eq!(serde_json::to_value(&place).unwrap()["type"], "hospital");
    }
}
