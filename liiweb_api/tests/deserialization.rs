use liiweb_api::types::{Document, ResourceIdentifier};
use serde_json::Value;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_legislation_listing() {
    let json = load_fixture("legislation_za.json");
    let doc: Document<Vec<Value>> = serde_json::from_str(&json).unwrap();
    assert_eq!(doc.data.len(), 2);
    assert_eq!(
        doc.data[1]["attributes"]["field_frbr_uri"],
        "/akn/za/act/2009/1/eng@2009-07-24"
    );
    assert!(doc.links.next_href().is_none());
    assert_eq!(
        doc.links.this.unwrap().href,
        "https://lii.example.org/jsonapi/node/legislation"
    );
}

#[test]
fn deserialize_next_link() {
    let json = r#"{
        "data": [],
        "links": {
            "self": {"href": "https://lii.example.org/jsonapi/node/legislation"},
            "next": {"href": "http://lii.example.org/jsonapi/node/legislation?page%5Boffset%5D=50"}
        }
    }"#;
    let doc: Document<Vec<Value>> = serde_json::from_str(json).unwrap();
    assert_eq!(
        doc.links.next_href(),
        Some("http://lii.example.org/jsonapi/node/legislation?page%5Boffset%5D=50")
    );
}

#[test]
fn deserialize_without_links() {
    let doc: Document<Vec<Value>> = serde_json::from_str(r#"{"data": []}"#).unwrap();
    assert!(doc.data.is_empty());
    assert!(doc.links.next.is_none());
}

#[test]
fn deserialize_single_expression() {
    let json = load_fixture("legislation_expression.json");
    let doc: Document<Option<Value>> = serde_json::from_str(&json).unwrap();
    let data = doc.data.unwrap();
    assert_eq!(data["type"], "node--legislation");
    assert_eq!(data["attributes"]["title"], "Companies Act, 2008");
}

#[test]
fn deserialize_null_data() {
    let doc: Document<Option<Value>> = serde_json::from_str(r#"{"data": null}"#).unwrap();
    assert!(doc.data.is_none());
}

#[test]
fn deserialize_uploaded_file() {
    let json = load_fixture("file_upload.json");
    let doc: Document<ResourceIdentifier> = serde_json::from_str(&json).unwrap();
    assert_eq!(doc.data.kind, "file--file");
    assert_eq!(doc.data.id, "9a8b7c6d-5e4f-4a3b-2c1d-0e9f8a7b6c5d");
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"{"data": not valid json}"#;
    let result = serde_json::from_str::<Document<Vec<Value>>>(bad_json);
    assert!(result.is_err());
}

#[test]
fn deserialize_missing_data_returns_error() {
    let json = r#"{"links": {}}"#;
    let result = serde_json::from_str::<Document<Vec<Value>>>(json);
    assert!(result.is_err());
}
