use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored supplier (vendor) record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    /// Tax or registration document number
    pub document: String,
    pub is_active: bool,
}

impl Supplier {
    /// Build the entity staged for a write. Call only after the payload has
    /// passed validation.
    pub fn from_payload(id: Uuid, payload: SupplierPayload) -> Self {
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            document: payload.document.unwrap_or_default(),
            is_active: payload.is_active,
        }
    }
}

/// Incoming body for create and update.
///
/// `name` and `document` are optional here so that a missing value is
/// reported by validation with a field error rather than as a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    /// Client-chosen id for create; ignored on update
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl SupplierPayload {
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            document: Some(document.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// The id to create with: the client's, unless absent or nil.
    pub fn id_or_generate(&self) -> Uuid {
        self.id
            .filter(|id| !id.is_nil())
            .unwrap_or_else(Uuid::now_v7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_supplier_serializes_camel_case() {
        let supplier = Supplier {
            id: Uuid::nil(),
            name: "Acme".to_string(),
            document: "12.345.678/0001-90".to_string(),
            is_active: true,
        };

        let value = serde_json::to_value(&supplier).unwrap();
        assert_eq!(value["isActive"], true);
        assert_eq!(value["document"], "12.345.678/0001-90");
    }

    #[test]
    fn test_payload_defaults_when_fields_missing() {
        let payload: SupplierPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(payload, SupplierPayload::default());
        assert!(!payload.is_active);
    }

    #[test]
    fn test_payload_accepts_null_fields() {
        let payload: SupplierPayload =
            serde_json::from_value(json!({"name": null, "document": "123"})).unwrap();
        assert!(payload.name.is_none());
        assert_eq!(payload.document.as_deref(), Some("123"));
    }

    #[test]
    fn test_id_or_generate_keeps_client_id() {
        let id = Uuid::now_v7();
        assert_eq!(SupplierPayload::new("a", "b").with_id(id).id_or_generate(), id);
    }

    #[test]
    fn test_id_or_generate_replaces_nil() {
        let id = SupplierPayload::new("a", "b")
            .with_id(Uuid::nil())
            .id_or_generate();
        assert!(!id.is_nil());
    }
}
