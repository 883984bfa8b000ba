use chrono::NaiveDate;
use rental_listings::models::Amenity;
use rental_listings::{InMemoryListingStore, Listing, ListingDraft, ListingService, SearchCriteria};
use serde_json::{json, Value};
use std::sync::Arc;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(title: &str, city: &str, accomodates: i32, price: i64) -> ListingDraft {
    ListingDraft {
        owner_id: 1,
        title: Some(title.to_string()),
        home_type: Some("apartment".to_string()),
        room_type: Some("whole".to_string()),
        accomodates: Some(accomodates),
        term: Some("nightly".to_string()),
        city: Some(city.to_string()),
        price: Some(price),
        address: Some(format!("{} street", title)),
        ..Default::default()
    }
}

fn titles(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.title.as_str()).collect()
}

fn criteria(params: Value) -> SearchCriteria {
    match params {
        Value::Object(map) => SearchCriteria::from_params(&map),
        _ => panic!("params must be an object"),
    }
}

/// Four listings with a spread of cities, sizes, prices and amenities
async fn fixture() -> ListingService {
    let service = ListingService::new(Arc::new(InMemoryListingStore::new()));

    let mut studio = draft("Studio", "paris", 1, 60);
    studio.amenities.set(Amenity::Wifi, true);
    let mut flat = draft("Flat", "Paris", 3, 110);
    flat.amenities.set(Amenity::Tv, true);
    flat.amenities.set(Amenity::Wifi, true);
    let mut house = draft("House", "Lyon", 4, 180);
    house.home_type = Some("house".to_string());
    house.room_type = Some("private".to_string());
    house.term = Some("monthly".to_string());
    house.amenities.set(Amenity::Kitchen, true);
    let mut cave = draft("Cave", "Lyon", 6, 40);
    cave.home_type = Some("cave".to_string());
    cave.room_type = Some("shared".to_string());

    for draft in [studio, flat, house, cave] {
        service.create_listing(draft).await.unwrap();
    }
    service
}

#[tokio::test]
async fn test_empty_criteria_returns_everything() {
    let service = fixture().await;
    let result = service.search(&criteria(json!({}))).await.unwrap();
    assert_eq!(titles(&result), vec!["Studio", "Flat", "House", "Cave"]);
}

#[tokio::test]
async fn test_single_key_criteria() {
    let service = fixture().await;

    let cases = vec![
        (json!({ "city": "PARIS" }), vec!["Studio", "Flat"]),
        (json!({ "accomodates": "4" }), vec!["House", "Cave"]),
        (json!({ "room_type": "shared" }), vec!["Cave"]),
        (json!({ "term": "monthly" }), vec!["House"]),
        (json!({ "home_type": "apartment" }), vec!["Studio", "Flat"]),
        (json!({ "kitchen": "1" }), vec!["House"]),
        (json!({ "low_price": "50", "high_price": "110" }), vec!["Studio", "Flat"]),
    ];

    for (params, expected) in cases {
        let result = service.search(&criteria(params.clone())).await.unwrap();
        assert_eq!(titles(&result), expected, "params: {}", params);
    }
}

#[tokio::test]
async fn test_accomodates_excludes_smaller_capacity() {
    let service = fixture().await;
    let result = service.search(&criteria(json!({ "accomodates": 4 }))).await.unwrap();
    assert!(result.iter().all(|l| l.accomodates >= 4));
    assert!(!titles(&result).contains(&"Flat"));
}

#[tokio::test]
async fn test_one_price_bound_does_not_filter() {
    let service = fixture().await;
    let low = service.search(&criteria(json!({ "low_price": 150 }))).await.unwrap();
    let high = service.search(&criteria(json!({ "high_price": 50 }))).await.unwrap();
    assert_eq!(low.len(), 4);
    assert_eq!(high.len(), 4);
}

#[tokio::test]
async fn test_amenities_only_narrow_results() {
    let service = fixture().await;

    let base = service.search(&criteria(json!({ "city": "paris" }))).await.unwrap();
    let with_false = service
        .search(&criteria(json!({ "city": "paris", "wifi": false, "tv": "0" })))
        .await
        .unwrap();
    assert_eq!(titles(&with_false), titles(&base));

    let with_wifi = service
        .search(&criteria(json!({ "city": "paris", "wifi": true })))
        .await
        .unwrap();
    let with_both = service
        .search(&criteria(json!({ "city": "paris", "wifi": true, "tv": true })))
        .await
        .unwrap();
    assert_eq!(titles(&with_wifi), vec!["Studio", "Flat"]);
    assert_eq!(titles(&with_both), vec!["Flat"]);
}

#[tokio::test]
async fn test_stay_window_uses_literal_range_check() {
    let service = fixture().await;
    let listings = service.search(&SearchCriteria::default()).await.unwrap();
    let studio = &listings[0];
    let flat = &listings[1];

    // Inside the requested window: kept
    service
        .new_unavail_range(studio.id, [date("2024-01-10"), date("2024-01-15")])
        .await
        .unwrap();
    // Reaches past the window end: dropped
    service
        .new_unavail_range(flat.id, [date("2024-01-18"), date("2024-01-25")])
        .await
        .unwrap();

    let result = service
        .search(&criteria(json!({ "start": "2024-01-01", "end": "2024-01-20" })))
        .await
        .unwrap();
    assert_eq!(titles(&result), vec!["Studio", "House", "Cave"]);

    let narrow = service
        .search(&criteria(json!({ "start": "2024-01-11", "end": "2024-01-20" })))
        .await
        .unwrap();
    assert_eq!(titles(&narrow), vec!["House", "Cave"]);
}

#[tokio::test]
async fn test_stay_window_needs_both_dates() {
    let service = fixture().await;
    let listings = service.search(&SearchCriteria::default()).await.unwrap();
    service
        .new_unavail_range(listings[0].id, [date("2024-02-01"), date("2024-02-03")])
        .await
        .unwrap();

    let result = service
        .search(&criteria(json!({ "start": "2024-03-01", "end": "" })))
        .await
        .unwrap();
    assert_eq!(result.len(), 4);
}

#[tokio::test]
async fn test_stay_window_runs_after_column_filters() {
    let service = fixture().await;
    let listings = service.search(&SearchCriteria::default()).await.unwrap();
    service
        .new_unavail_range(listings[3].id, [date("2023-12-30"), date("2024-01-02")])
        .await
        .unwrap();

    let result = service
        .search(&criteria(json!({
            "city": "lyon",
            "start": "2024-01-01",
            "end": "2024-01-31",
        })))
        .await
        .unwrap();
    assert_eq!(titles(&result), vec!["House"]);
}
