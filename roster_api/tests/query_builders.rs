use roster_api::types::Resource;
use roster_api::{ListQuery, Query, SortDirection};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

#[test]
fn list_query_defaults() {
    let url = ListQuery::default().add_to_url(&base_url());
    assert_eq!(url.query(), Some("page=1"));
}

#[test]
fn list_query_with_page_and_size() {
    let url = ListQuery::default()
        .with_page(3)
        .with_page_size(50)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("page=3"));
    assert!(query.contains("pageSize=50"));
}

#[test]
fn list_query_sort_variants() {
    let url = ListQuery::default()
        .with_sort_by("entryDate")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("sortBy=entryDate"));
    assert!(query.contains("sortOrder=asc"));

    let url = ListQuery::default()
        .with_sort_by("entryDate")
        .with_sort_direction(SortDirection::Desc)
        .add_to_url(&base_url());
    assert!(url.query().unwrap().contains("sortOrder=desc"));
}

#[test]
fn list_query_filters_are_sorted_by_key() {
    let pairs = ListQuery::default()
        .with_filter("status", "active")
        .with_filter("community", "7")
        .to_pairs();
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["page", "community", "status"]);
}

#[test]
fn list_query_escapes_search() {
    let url = ListQuery::default()
        .with_search("Thérèse & co")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("search=Th%C3%A9r%C3%A8se+%26+co"));
}

#[test]
fn later_filter_replaces_earlier_value() {
    let query = ListQuery::default()
        .with_filter("stage", "postulant")
        .with_filter("stage", "novice");
    assert_eq!(query.filters.get("stage").map(String::as_str), Some("novice"));
}

#[test]
fn resource_paths_are_distinct() {
    let mut paths: Vec<&str> = Resource::ALL.iter().map(|r| r.path()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), Resource::ALL.len());
}
