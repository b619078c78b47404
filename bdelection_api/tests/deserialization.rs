use bdelection_api::types::{District, Seat};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_districts_mixed_id_types() {
    let json = load_fixture("districts.json");
    let districts: Vec<District> = serde_json::from_str(&json).unwrap();
    assert_eq!(districts.len(), 2);
    assert_eq!(districts[0].id, "1201");
    assert_eq!(districts[0].name, "Dhaka");
    assert_eq!(districts[1].id, "1202");
}

#[test]
fn deserialize_seats() {
    let json = load_fixture("seats.json");
    let seats: Vec<Seat> = serde_json::from_str(&json).unwrap();
    assert_eq!(seats.len(), 3);
    assert_eq!(seats[0].id, "dhaka_1");
    assert_eq!(seats[0].name, "Dhaka-1");
    assert_eq!(seats[0].number(), "1");
}

#[test]
fn deserialize_district_missing_name_fails() {
    let result = serde_json::from_str::<Vec<District>>(r#"[{"id": 3}]"#);
    assert!(result.is_err());
}

#[test]
fn deserialize_seat_numeric_id() {
    let seats: Vec<Seat> = serde_json::from_str(r#"[{"id": 145, "name": "Cumilla-1"}]"#).unwrap();
    assert_eq!(seats[0].id, "145");
    assert_eq!(seats[0].number(), "145");
}

#[test]
fn serialize_district_roundtrips_as_string_id() {
    let district = District {
        id: "42".to_string(),
        name: "Sylhet".to_string(),
    };
    let value = serde_json::to_value(&district).unwrap();
    assert_eq!(value["id"], "42");
}
