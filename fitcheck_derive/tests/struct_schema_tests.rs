// Integration tests for the schema generated by #[derive(ModelOutput)]
use fitcheck::{FitcheckError, ModelOutput, SchemaType};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(ModelOutput, Serialize, Deserialize, Debug, PartialEq)]
#[llm(description = "A garment in the picture")]
struct Garment {
    #[llm(description = "Kind of garment", example = "jacket")]
    kind: String,

    #[llm(description = "Fit score", minimum = 1, maximum = 5)]
    fit: u8,
}

#[derive(ModelOutput, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
#[llm(name = "describe_look", description = "Describe the look")]
struct LookDescription {
    #[llm(description = "Headline for the look")]
    headline_text: String,

    #[serde(rename = "colours")]
    #[llm(description = "Dominant colours", example = ["navy", "white"])]
    dominant_colours: Vec<String>,

    garments: Vec<Garment>,

    main_piece: Garment,

    #[llm(description = "Optional stylist note")]
    stylist_note: Option<String>,

    is_formal: bool,
}

// Field with no attributes at all
#[derive(ModelOutput, Serialize, Deserialize, Debug)]
struct Bare {
    value: f64,
}

#[test]
fn test_container_attributes() {
    let schema = LookDescription::schema();
    let json = schema.to_json();

    assert_eq!(json["type"], "object");
    assert_eq!(json["title"], "LookDescription");
    assert_eq!(json["description"], "Describe the look");
    assert_eq!(LookDescription::schema_name(), Some("describe_look".to_string()));
    assert_eq!(Bare::schema_name(), Some("Bare".to_string()));
}

#[test]
fn test_field_names_follow_serde() {
    let schema = LookDescription::schema();
    let properties = schema.to_json()["properties"].as_object().unwrap();

    let mut names: Vec<_> = properties.keys().cloned().collect();
    names.sort();
    assert_eq!(
        names,
        vec!["colours", "garments", "headlineText", "isFormal", "mainPiece", "stylistNote"]
    );
}

#[test]
fn test_required_excludes_options() {
    let schema = LookDescription::schema();
    let required: Vec<_> = schema.to_json()["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();

    assert!(required.contains(&"headlineText".to_string()));
    assert!(required.contains(&"isFormal".to_string()));
    assert!(!required.contains(&"stylistNote".to_string()));
}

#[test]
fn test_property_keywords() {
    let schema = LookDescription::schema();
    let properties = &schema.to_json()["properties"];

    assert_eq!(properties["headlineText"]["type"], "string");
    assert_eq!(properties["headlineText"]["description"], "Headline for the look");
    assert_eq!(properties["colours"]["type"], "array");
    assert_eq!(properties["colours"]["items"]["type"], "string");
    assert_eq!(properties["colours"]["example"], json!(["navy", "white"]));
    assert_eq!(properties["isFormal"]["type"], "boolean");
    assert_eq!(properties["stylistNote"]["type"], "string");

    let garment = Garment::schema();
    let garment_props = &garment.to_json()["properties"];
    assert_eq!(garment_props["fit"]["type"], "integer");
    assert_eq!(garment_props["fit"]["minimum"], 1);
    assert_eq!(garment_props["fit"]["maximum"], 5);
    assert_eq!(garment_props["kind"]["example"], "jacket");
}

#[test]
fn test_nested_structs_embed_their_schema() {
    let schema = LookDescription::schema();
    let properties = &schema.to_json()["properties"];

    assert_eq!(properties["mainPiece"]["type"], "object");
    assert_eq!(properties["mainPiece"]["description"], "A garment in the picture");
    assert_eq!(properties["garments"]["items"]["properties"]["fit"]["maximum"], 5);
}

#[test]
fn test_nested_bounds_are_validated() {
    let value = json!({
        "headlineText": "Weekend layers",
        "colours": ["olive"],
        "garments": [{ "kind": "coat", "fit": 9 }],
        "mainPiece": { "kind": "coat", "fit": 4 },
        "isFormal": false
    });

    match LookDescription::from_json_value(value) {
        Err(FitcheckError::ValidationError(message)) => {
            assert!(message.contains("/garments/0/fit"), "message: {message}");
        }
        other => panic!("expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_valid_value_round_trips() {
    let value = json!({
        "headlineText": "Weekend layers",
        "colours": ["olive", "cream"],
        "garments": [],
        "mainPiece": { "kind": "coat", "fit": 4 },
        "stylistNote": null,
        "isFormal": false
    });

    let look = LookDescription::from_json_value(value).expect("valid look");
    assert_eq!(look.main_piece.kind, "coat");
    assert_eq!(look.stylist_note, None);
    assert!(look.validate().is_ok());
}

#[test]
fn test_bare_struct() {
    let schema = Bare::schema();
    let json = schema.to_json();
    assert_eq!(json["properties"]["value"], json!({ "type": "number" }));
    assert_eq!(json["required"], json!(["value"]));
}
