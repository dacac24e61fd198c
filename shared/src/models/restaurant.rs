//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub foodtype: String,
    pub address: String,
    pub province: String,
    pub postalcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    /// Picture URL
    pub picture: String,
}

/// Create/update restaurant payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RestaurantPayload {
    pub name: String,
    pub foodtype: String,
    pub address: String,
    pub province: String,
    pub postalcode: String,
    pub tel: String,
    pub picture: String,
}

impl RestaurantPayload {
    /// Apply this payload onto an existing record, keeping its id.
    pub fn apply_to(&self, restaurant: &mut Restaurant) {
        restaurant.name = self.name.clone();
        restaurant.foodtype = self.foodtype.clone();
        restaurant.address = self.address.clone();
        restaurant.province = self.province.clone();
        restaurant.postalcode = self.postalcode.clone();
        restaurant.tel = Some(self.tel.clone());
        restaurant.picture = self.picture.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_tel_is_skipped_when_absent() {
        let json = r#"{
            "id": "r1",
            "name": "Thai Garden",
            "foodtype": "Thai",
            "address": "1 Main Rd",
            "province": "Bangkok",
            "postalcode": "10110",
            "picture": "https://example.com/p.jpg"
        }"#;
        let r: Restaurant = serde_json::from_str(json).unwrap();
        assert!(r.tel.is_none());
        let back = serde_json::to_string(&r).unwrap();
        assert!(!back.contains("tel"));
    }

    #[test]
    fn payload_apply_patches_in_place() {
        let mut r = Restaurant {
            id: "r1".into(),
            name: "Old".into(),
            foodtype: "Thai".into(),
            address: "1 Main Rd".into(),
            province: "Bangkok".into(),
            postalcode: "10110".into(),
            tel: None,
            picture: "https://example.com/p.jpg".into(),
        };
        let payload = RestaurantPayload {
            name: "New".into(),
            foodtype: "Italian".into(),
            address: "2 Side St".into(),
            province: "Phuket".into(),
            postalcode: "83000".into(),
            tel: "021112222".into(),
            picture: "https://example.com/q.jpg".into(),
        };
        payload.apply_to(&mut r);
        assert_eq!(r.id, "r1");
        assert_eq!(r.name, "New");
        assert_eq!(r.tel.as_deref(), Some("021112222"));
    }
}
