//! OpenAPI document for the shared contract types.
//!
//! [`ContractsDoc`] registers the schema wrappers from
//! [`crate::inbound::http::schemas`] as components so client generators and
//! the server's own document can reference them. Export it with
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ApiErrorSchema, AuthTokenSchema, ErrorCodeSchema, FieldErrorSchema, GeneratedFileSchema,
    GenerationJobSchema, GenerationResultSchema, GenerationStatusSchema, PageMetaSchema,
    UserRoleSchema, UserSchema,
};

/// OpenAPI components describing every contract type.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Site generator API contracts",
        description = "Shared data shapes exchanged between the web client and the API server.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    components(schemas(
        ErrorCodeSchema,
        FieldErrorSchema,
        ApiErrorSchema,
        UserRoleSchema,
        UserSchema,
        AuthTokenSchema,
        GenerationStatusSchema,
        GenerationJobSchema,
        GeneratedFileSchema,
        GenerationResultSchema,
        PageMetaSchema,
    ))
)]
pub struct ContractsDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying component registration and field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("domain.ApiError", &["code", "message", "details", "fieldErrors", "correlationId"])]
    #[case("domain.User", &["id", "email", "displayName", "role", "createdAt"])]
    #[case("domain.GenerationJob", &["id", "userId", "status", "progress", "updatedAt"])]
    #[case("domain.PageMeta", &["page", "pageSize", "totalItems", "totalPages"])]
    fn components_carry_wire_members(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ContractsDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} is registered"));
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn every_wrapper_is_registered() {
        let doc = ContractsDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_eq!(schemas.len(), 11, "registered: {:?}", schemas.keys());
    }
}
