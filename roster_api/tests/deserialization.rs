use roster_api::types::{PaginatedResponse, Paging, Response};
use serde::Deserialize;
use serde_json::Value;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditEntry {
    id: i64,
    action: String,
    entity_id: String,
}

#[test]
fn paginated_response_reads_paging() {
    let resp: PaginatedResponse<Value> =
        serde_json::from_str(&load_fixture("sisters.json")).unwrap();
    assert_eq!(
        resp.meta.paging,
        Paging {
            page: 1,
            size: 10,
            total_items: 2,
            total_pages: 1,
        }
    );
}

#[test]
fn total_pages_is_optional() {
    let resp: PaginatedResponse<AuditEntry> =
        serde_json::from_str(&load_fixture("audit_logs.json")).unwrap();
    assert_eq!(resp.meta.paging.total_items, 47);
    assert_eq!(resp.meta.paging.total_pages, 0);
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.data[0].id, 901);
    assert_eq!(resp.data[0].action, "update");
    assert_eq!(resp.data[1].entity_id, "m-044");
}

#[test]
fn single_record_response() {
    let resp: Response<Value> = serde_json::from_str(&load_fixture("sister.json")).unwrap();
    assert_eq!(resp.data["stage"], "perpetual_vows");
}

#[test]
fn missing_paging_is_an_error() {
    let result = serde_json::from_str::<PaginatedResponse<Value>>(r#"{"data": []}"#);
    assert!(result.is_err());
}
