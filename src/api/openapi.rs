//! OpenAPI description of the REST surface, published in development.
//!
//! Schemas are derived from the wire types. The paths are assembled per
//! resource because the handlers are generic and carry no annotations.

use once_cell::sync::Lazy;
use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::path::{
    OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemBuilder, PathItemType,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::response::{Response, ResponseBuilder};
use utoipa::openapi::schema::{
    ArrayBuilder, KnownFormat, ObjectBuilder, Ref, Schema, SchemaFormat, SchemaType,
};
use utoipa::openapi::{OpenApi as Document, RefOr, Required};
use utoipa::{OpenApi, ToSchema};

use crate::api::{
    CustomerDto, CustomerPayload, ProductDto, ProductPayload, SaleDto, SalePayload, StoreDto,
    StorePayload,
};
use crate::services::{Customers, Products, Resource, Sales, Stores};

const JSON: &str = "application/json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store Manager API",
        description = "Customers, products, stores and sales"
    ),
    components(schemas(
        CustomerDto,
        CustomerPayload,
        ProductDto,
        ProductPayload,
        StoreDto,
        StorePayload,
        SaleDto,
        SalePayload
    )),
    tags(
        (name = "customer", description = "People who buy"),
        (name = "product", description = "Things for sale"),
        (name = "store", description = "Places that sell"),
        (name = "sale", description = "One product sold to one customer at one store")
    )
)]
struct ApiDoc;

static DOCUMENT: Lazy<Document> = Lazy::new(build);

/// The generated document, built once
pub fn document() -> &'static Document {
    &DOCUMENT
}

fn build() -> Document {
    let mut doc = ApiDoc::openapi();
    for (path, item) in resource_paths::<Customers>()
        .into_iter()
        .chain(resource_paths::<Products>())
        .chain(resource_paths::<Stores>())
        .chain(resource_paths::<Sales>())
    {
        doc.paths.paths.insert(path, item);
    }
    doc
}

fn schema_name<T: ToSchema<'static>>() -> &'static str {
    T::schema().0
}

/// `/api/{name}` and `/api/{name}/{id}` for one resource
fn resource_paths<R: Resource>() -> [(String, PathItem); 2]
where
    R::Dto: ToSchema<'static>,
    R::Payload: ToSchema<'static>,
{
    let dto = schema_name::<R::Dto>();
    let payload = schema_name::<R::Payload>();

    let list = OperationBuilder::new()
        .tag(R::NAME)
        .operation_id(Some(format!("list_{}", R::PLURAL)))
        .summary(Some(format!("List all {}", R::PLURAL)))
        .response("200", json_response("Every row", array_of(dto)))
        .response("500", plain_response("Store failure"))
        .build();

    let create = OperationBuilder::new()
        .tag(R::NAME)
        .operation_id(Some(format!("create_{}", R::NAME)))
        .summary(Some(format!("Create a {}", R::NAME)))
        .request_body(Some(json_body(payload)))
        .response("201", json_response("Created; Location points at the new row", reference(dto)))
        .response("400", plain_response("Missing fields or malformed JSON"))
        .response("500", plain_response("Store failure"))
        .build();

    let get = OperationBuilder::new()
        .tag(R::NAME)
        .operation_id(Some(format!("get_{}", R::NAME)))
        .summary(Some(format!("Fetch one {}", R::NAME)))
        .parameter(id_parameter())
        .response("200", json_response("The row", reference(dto)))
        .response("404", plain_response("No such id"))
        .build();

    let update = OperationBuilder::new()
        .tag(R::NAME)
        .operation_id(Some(format!("update_{}", R::NAME)))
        .summary(Some(format!("Replace a {}; the body id must match the path", R::NAME)))
        .parameter(id_parameter())
        .request_body(Some(json_body(payload)))
        .response("200", json_response("The updated row", reference(dto)))
        .response("400", plain_response("ID mismatch, missing fields or malformed JSON"))
        .response("404", plain_response("No such id"))
        .response("500", plain_response("Store failure"))
        .build();

    let delete = OperationBuilder::new()
        .tag(R::NAME)
        .operation_id(Some(format!("delete_{}", R::NAME)))
        .summary(Some(format!("Delete a {}", R::NAME)))
        .parameter(id_parameter())
        .response("204", plain_response("Deleted"))
        .response("404", plain_response("No such id"))
        .response("500", plain_response("Store failure"))
        .build();

    let collection = PathItemBuilder::new()
        .operation(PathItemType::Get, list)
        .operation(PathItemType::Post, create)
        .build();
    let record = PathItemBuilder::new()
        .operation(PathItemType::Get, get)
        .operation(PathItemType::Put, update)
        .operation(PathItemType::Delete, delete)
        .build();

    [
        (format!("/api/{}", R::NAME), collection),
        (format!("/api/{}/{{id}}", R::NAME), record),
    ]
}

fn reference(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn array_of(name: &str) -> RefOr<Schema> {
    RefOr::T(Schema::Array(ArrayBuilder::new().items(reference(name)).build()))
}

fn json_response(description: &str, schema: RefOr<Schema>) -> RefOr<Response> {
    RefOr::T(
        ResponseBuilder::new()
            .description(description)
            .content(JSON, ContentBuilder::new().schema(schema).build())
            .build(),
    )
}

fn plain_response(description: &str) -> RefOr<Response> {
    RefOr::T(ResponseBuilder::new().description(description).build())
}

fn json_body(payload: &str) -> RequestBody {
    RequestBodyBuilder::new()
        .content(JSON, ContentBuilder::new().schema(reference(payload)).build())
        .required(Some(Required::True))
        .build()
}

fn id_parameter() -> utoipa::openapi::path::Parameter {
    let integer = ObjectBuilder::new()
        .schema_type(SchemaType::Integer)
        .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int64)))
        .build();

    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(RefOr::T(Schema::Object(integer))))
        .build()
}
