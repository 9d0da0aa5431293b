//! Integration tests for the EDGAR HTTP client against a mock server.

use secfetch_data::{ClientConfig, DataError, EdgarClient, FilingQuery, QueryFilter};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TICKERS: &str = include_str!("fixtures/company_tickers.json");
const APPLE: &str = include_str!("fixtures/submissions/CIK0000320193.json");
const APPLE_PAGE: &str = include_str!("fixtures/submissions/CIK0000320193-submissions-001.json");
const USER_AGENT: &str = "secfetch-tests admin@example.org";

fn client(server: &MockServer) -> EdgarClient {
    let config = ClientConfig::default()
        .with_base_url(&server.uri())
        .with_user_agent(USER_AGENT)
        .with_min_interval(Duration::ZERO);
    EdgarClient::with_config(config).unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_query_over_http() {
    let server = MockServer::start().await;
    mount_json(&server, "/files/company_tickers.json", TICKERS).await;
    mount_json(&server, "/submissions/CIK0000320193.json", APPLE).await;

    let filter = QueryFilter::builder("aapl")
        .forms(["10-K"])
        .limit(Some(2))
        .build()
        .unwrap();
    let result = FilingQuery::new(client(&server)).run(&filter).await.unwrap();

    assert_eq!(result.company.name, "Apple Inc.");
    assert_eq!(result.filings.len(), 2);
    assert_eq!(result.filings[0].accession_number, "0000320193-24-000123");
    assert_eq!(
        result.filings[0].document_url,
        format!(
            "{}/Archives/edgar/data/320193/000032019324000123/aapl-20240928.htm",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_older_page_requested_over_http() {
    let server = MockServer::start().await;
    mount_json(&server, "/files/company_tickers.json", TICKERS).await;
    mount_json(&server, "/submissions/CIK0000320193.json", APPLE).await;
    Mock::given(method("GET"))
        .and(path("/submissions/CIK0000320193-submissions-001.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(APPLE_PAGE, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let filter = QueryFilter::builder("AAPL")
        .forms(["10-K"])
        .date_from(chrono::NaiveDate::from_ymd_opt(2012, 1, 1))
        .date_to(chrono::NaiveDate::from_ymd_opt(2013, 12, 31))
        .build()
        .unwrap();
    let result = FilingQuery::new(client(&server)).run(&filter).await.unwrap();

    assert_eq!(result.pages_fetched, 1);
    assert_eq!(result.filings.len(), 2);
}

#[tokio::test]
async fn test_ticker_mapping_downloaded_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/company_tickers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TICKERS, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(client.get_company("AAPL").await.unwrap().cik.as_str(), "0000320193");
    assert_eq!(client.get_company("msft").await.unwrap().cik.as_str(), "0000789019");
    assert!(client.get_company("ZZZZ").await.unwrap_err().is_unknown_ticker());
}

#[tokio::test]
async fn test_http_error_is_service_unavailable() {
    let server = MockServer::start().await;
    mount_json(&server, "/files/company_tickers.json", TICKERS).await;
    Mock::given(method("GET"))
        .and(path("/submissions/CIK0000320193.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let filter = QueryFilter::builder("AAPL").build().unwrap();
    let err = FilingQuery::new(client(&server)).run(&filter).await.unwrap_err();

    assert!(err.is_service_unavailable(), "unexpected error: {err}");
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_malformed_ticker_mapping_is_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/company_tickers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = client(&server).get_company("AAPL").await.unwrap_err();
    assert!(matches!(err, DataError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_service_unavailable() {
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let client = EdgarClient::with_config(config).unwrap();

    let err = client.get_company("AAPL").await.unwrap_err();
    assert!(err.is_service_unavailable());
}
