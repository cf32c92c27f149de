use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_image_id_creation() {
    let id = ImageId::new();
    assert!(!id.to_string().is_empty());
    assert_eq!(id.into_inner().get_version_num(), 7);
}

#[test]
fn test_image_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = ImageId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(ImageId::from(uuid), id);
}

#[test]
fn test_image_id_display() {
    let uuid = Uuid::new_v4();
    let id = ImageId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_image_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = ImageId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_image_id_from_str_error() {
    assert!(ImageId::from_str("invalid").is_err());
    assert!(ImageId::from_str("").is_err());
    assert!(ImageId::from_str("65f1c0ffee0123456789abcd").is_err());
}

#[test]
fn test_image_id_is_time_ordered() {
    let first = ImageId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = ImageId::new();
    assert!(first < second);
}

#[test]
fn test_image_id_serializes_as_plain_string() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&ImageId::from_uuid(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
