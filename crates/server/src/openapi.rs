use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PalDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[schema(example = "tkubm1760")]
    pub name: String,
    #[schema(example = "6")]
    pub sid: String,
    pub attribute: String,
    pub work_compatibility: String,
    pub image: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PalInputDoc {
    #[schema(example = "tkubm1760")]
    pub name: String,
    pub attribute: Option<String>,
    pub work_compatibility: Option<String>,
    pub image: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PalPatchDoc {
    pub name: Option<String>,
    pub attribute: Option<String>,
    pub work_compatibility: Option<String>,
    pub image: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PalEnvelopeDoc {
    pub code: u16,
    pub message: String,
    pub body: Option<PalDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct PalListEnvelopeDoc {
    pub code: u16,
    pub message: String,
    pub body: Option<Vec<PalDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::pals::find_all,
        crate::routes::pals::insert_one,
        crate::routes::pals::delete_by_name,
        crate::routes::pals::update_by_name,
        crate::routes::pals::find_by_name,
    ),
    components(
        schemas(
            HealthResponse,
            PalDoc,
            PalInputDoc,
            PalPatchDoc,
            PalEnvelopeDoc,
            PalListEnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "pals")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_roster_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/pals/findAll",
            "/api/v1/pals/insertOne",
            "/api/v1/pals/deleteByName",
            "/api/v1/pals/updateByName",
            "/api/v1/pals/findByName",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
