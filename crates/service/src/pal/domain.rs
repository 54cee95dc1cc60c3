use serde::{Deserialize, Serialize};

/// A roster record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pal {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Sequential seat id, rendered as a decimal string.
    pub sid: String,
    pub attribute: String,
    pub work_compatibility: String,
    pub image: String,
}

/// Insert payload. `_id` and `sid` are assigned by the service, so any
/// values a client sends for them are dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PalInput {
    pub name: String,
    pub attribute: String,
    pub work_compatibility: String,
    pub image: String,
}

/// Row handed to a repository once the seat id is known.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPal {
    pub name: String,
    pub sid: i64,
    pub attribute: String,
    pub work_compatibility: String,
    pub image: String,
}

/// Partial update. Identity and seat id are not part of the patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PalPatch {
    pub name: Option<String>,
    pub attribute: Option<String>,
    pub work_compatibility: Option<String>,
    pub image: Option<String>,
}

impl PalPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.attribute.is_none()
            && self.work_compatibility.is_none()
            && self.image.is_none()
    }

    /// Apply the provided fields onto `pal` in place.
    pub fn apply_to(&self, pal: &mut Pal) {
        if let Some(v) = &self.name { pal.name = v.clone(); }
        if let Some(v) = &self.attribute { pal.attribute = v.clone(); }
        if let Some(v) = &self.work_compatibility { pal.work_compatibility = v.clone(); }
        if let Some(v) = &self.image { pal.image = v.clone(); }
    }
}

/// Outcome of a delete-by-name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Parts decoded from a username such as `tkubm1760`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatInfo {
    pub school_name: String,
    pub department: String,
    pub seat_number: String,
}
