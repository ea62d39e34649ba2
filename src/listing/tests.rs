//! Tests for the listing data model

use super::*;
use crate::types::Category;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

#[test]
fn test_listing_record_from_backend_json() {
    let body = json!({
        "_id": "66f1c0a2e4b0a1b2c3d4e5f6",
        "id": 18674,
        "host_id": 71615,
        "name": "Olive grove farmhouse",
        "picture_url": "https://example.com/18674.jpg",
        "property_type": "FarmHouses",
        "room_type": "Entire home/apt",
        "accommodates": 8,
        "bedrooms": 3,
        "beds": null,
        "bathrooms": null,
        "bathrooms_text": "2 baths",
        "price": "$210.00",
        "review_scores_rating": 4.3,
        "number_of_reviews": 38,
        "latitude": 31.95,
        "longitude": 35.93,
        "calendar_last_scraped": "2023-09-06",
        "reviews_per_month": 0.3
    });

    let record: ListingRecord = serde_json::from_value(body).unwrap();
    assert_eq!(record.document_id.as_deref(), Some("66f1c0a2e4b0a1b2c3d4e5f6"));
    assert_eq!(
        record.key(),
        ListingKey {
            id: 18674,
            host_id: 71615
        }
    );
    assert_eq!(record.property_type.as_deref(), Some("FarmHouses"));
    assert_eq!(record.bedrooms, Some(3));
    assert_eq!(record.beds, None);
    assert_eq!(record.number_of_reviews, 38);
}

#[test]
fn test_listing_record_minimal_json() {
    let record: ListingRecord = serde_json::from_value(json!({"id": 1, "host_id": 2})).unwrap();
    assert_eq!(record, ListingRecord::new(1, 2, ""));
}

#[test]
fn test_listing_record_requires_identity() {
    let result = serde_json::from_value::<ListingRecord>(json!({"name": "no id"}));
    assert!(result.is_err());
}

#[test_case(Some("$210.00"), Some(210.0) ; "dollars")]
#[test_case(Some("$1,250.50"), Some(1250.5) ; "thousands separator")]
#[test_case(Some("95"), Some(95.0) ; "bare number")]
#[test_case(Some("call us"), None ; "no digits")]
#[test_case(None, None ; "missing")]
fn test_price_amount(price: Option<&str>, expected: Option<f64>) {
    let mut record = ListingRecord::new(1, 1, "x");
    record.price = price.map(String::from);
    assert_eq!(record.price_amount(), expected);
}

#[test]
fn test_in_category() {
    let record = ListingRecord::new(1, 1, "x").with_property_type("Catering");
    assert!(record.in_category(&Category::All));
    assert!(record.in_category(&Category::new("Catering")));
    assert!(!record.in_category(&Category::new("FarmHouses")));
}

#[test]
fn test_page_query_params() {
    let query = PageQuery::new("FarmHouses", 2, 20);
    let params = query.to_params();

    assert_eq!(params.get("category"), Some(&"FarmHouses".to_string()));
    assert_eq!(params.get("page"), Some(&"2".to_string()));
    assert_eq!(params.get("limit"), Some(&"20".to_string()));
    assert_eq!(query.offset(), 20);
}

#[test]
fn test_page_query_all_sentinel() {
    let query = PageQuery::new(Category::All, 1, DEFAULT_PAGE_SIZE);
    assert_eq!(query.to_params().get("category"), Some(&"all".to_string()));
    assert_eq!(query.offset(), 0);
}

#[test]
fn test_page_query_validate() {
    assert!(PageQuery::new("DJ", 1, 20).validate().is_ok());
    assert!(PageQuery::new("DJ", 0, 20).validate().is_err());
    assert!(PageQuery::new("DJ", 1, 0).validate().is_err());
}

#[test]
fn test_listing_page_decoding() {
    let page: ListingPage = serde_json::from_value(json!({
        "farmhouses": [
            {"id": 1, "host_id": 10},
            {"id": 2, "host_id": 20}
        ]
    }))
    .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.records[1].id, 2);
    assert!(page.is_last(20));
    assert!(!page.is_last(2));
}

#[test]
fn test_listing_page_missing_array_is_malformed() {
    let result = serde_json::from_value::<ListingPage>(json!({"items": []}));
    assert!(result.is_err());
}

#[test]
fn test_empty_page_is_last() {
    let page = ListingPage::default();
    assert!(page.is_empty());
    assert!(page.is_last(1));
}
