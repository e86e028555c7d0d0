use serde::Serialize;
use serde_json::json;
use swgen::prelude::*;

// ── Fixtures ────────────────────────────────────────────────────────────────

#[derive(Serialize, Reflect)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Display name shown in the UI.
    pub display_name: String,
    #[serde(rename = "kind")]
    pub account_type: String,
    pub r#type: String,
    #[serde(skip)]
    pub cache: Vec<u8>,
    #[swgen(skip)]
    pub scratch: String,
    #[swgen(rename = "createdOn", type = "date", description = "Creation date")]
    pub created_at: String,
}

#[derive(Reflect)]
#[swgen(name = "PetResource")]
pub struct Pet {
    pub id: i64,
}

#[derive(Reflect)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Reflect)]
pub struct Tag {
    pub label: String,
}

#[derive(Reflect)]
pub struct Catalog {
    pub pets: Page<Pet>,
    pub tags: Page<Tag>,
}

#[derive(Serialize, Reflect)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Low,
    #[serde(rename = "mid")]
    Medium,
    Highest,
    #[serde(skip)]
    Internal,
}

#[derive(Reflect)]
pub struct UserId(pub u64);

#[derive(Reflect)]
pub struct Meta {
    pub version: i32,
    pub released: chrono::NaiveDate,
}

#[derive(Serialize, Reflect)]
pub struct Response {
    pub ok: bool,
    #[serde(flatten)]
    pub meta: MetaSer,
}

#[derive(Serialize, Reflect)]
pub struct MetaSer {
    pub version: i32,
}

#[derive(Reflect)]
pub struct Envelope {
    pub payload: Dynamic,
}

// ── Naming from attributes ──────────────────────────────────────────────────

#[test]
fn serde_renames_and_docs() {
    let generator = Generator::new();
    generator.build_schema_for::<Account>().unwrap();

    assert_eq!(
        generator.definitions_json()["Account"],
        json!({
            "type": "object",
            "properties": {
                "displayName": {"type": "string", "description": "Display name shown in the UI."},
                "kind": {"type": "string"},
                "type": {"type": "string"},
                "createdOn": {"type": "string", "format": "date", "description": "Creation date"},
            },
        })
    );
}

#[test]
fn container_name_attribute() {
    let generator = Generator::new();
    let node = generator.build_schema_for::<Pet>().unwrap();
    assert_eq!(node.to_value(), json!({"$ref": "#/definitions/PetResource"}));
}

#[test]
fn generic_instantiations_are_distinct_definitions() {
    let generator = Generator::new();
    generator.build_schema_for::<Catalog>().unwrap();
    let defs = generator.definitions_json();

    assert_eq!(
        defs["Catalog"]["properties"],
        json!({
            "pets": {"$ref": "#/definitions/Page"},
            "tags": {"$ref": "#/definitions/PageType2"},
        })
    );
    assert_eq!(
        defs["Page"]["properties"]["items"]["items"],
        json!({"$ref": "#/definitions/PetResource"})
    );
    assert_eq!(
        defs["PageType2"]["properties"]["items"]["items"],
        json!({"$ref": "#/definitions/Tag"})
    );
}

// ── Enums and newtypes ──────────────────────────────────────────────────────

#[test]
fn enum_values_follow_serde() {
    let generator = Generator::new();
    let node = generator.build_schema_for::<Level>().unwrap();
    assert_eq!(
        node.to_value(),
        json!({
            "type": "string",
            "enum": ["LOW", "mid", "HIGHEST"],
            "x-enum-names": ["Low", "Medium", "Highest"],
        })
    );
}

#[test]
fn newtype_describes_its_inner_type() {
    let generator = Generator::new();
    let node = generator.build_schema_for::<UserId>().unwrap();
    assert_eq!(
        node.to_value(),
        json!({"type": "integer", "format": "int64", "minimum": 0.0})
    );
}

// ── Flattening and dynamic values ───────────────────────────────────────────

#[test]
fn serde_flatten_embeds_properties() {
    let generator = Generator::new();
    generator.build_schema_for::<Response>().unwrap();
    let defs = generator.definitions_json();

    assert_eq!(
        defs["Response"]["properties"],
        json!({
            "ok": {"type": "boolean"},
            "version": {"type": "integer", "format": "int32"},
        })
    );
    assert!(defs.get("MetaSer").is_none());
}

#[test]
fn dynamic_value_through_the_facade() {
    let generator = Generator::new();
    let envelope = Envelope {
        payload: Dynamic::new(Meta {
            version: 1,
            released: chrono::NaiveDate::default(),
        }),
    };
    generator.build_schema(&envelope).unwrap();
    let defs = generator.definitions_json();
    assert_eq!(
        defs["Envelope"]["properties"]["payload"],
        json!({"$ref": "#/definitions/Meta"})
    );
    assert_eq!(
        defs["Meta"]["properties"]["released"],
        json!({"type": "string", "format": "date"})
    );
}

// ── Parameters through the facade ───────────────────────────────────────────

#[derive(Reflect)]
pub struct ListPets {
    /// Maximum number of results.
    #[swgen(query = "limit", maximum = 50, default = 20)]
    pub limit: i32,
    #[swgen(header = "X-Api-Key", required = true)]
    pub api_key: String,
}

#[test]
fn parameters_carry_doc_descriptions() {
    let generator = Generator::new();
    let (name, params) = generator.bind_parameters_for::<ListPets>().unwrap();

    assert_eq!(name, "ListPets");
    assert_eq!(
        serde_json::to_value(&params).unwrap(),
        json!([
            {
                "name": "limit",
                "in": "query",
                "type": "integer",
                "format": "int32",
                "maximum": 50.0,
                "default": 20,
                "description": "Maximum number of results.",
            },
            {"name": "X-Api-Key", "in": "header", "type": "string", "required": true},
        ])
    );
    assert_eq!(params[1].location, Location::Header);
}
