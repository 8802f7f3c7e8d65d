//! Integration tests for the resource client against a mock backend.
//!
//! Covers list queries with pagination headers, single fetches with the
//! Book date transform, create/replace dispatch, deletes, and the mapping of
//! error statuses to resource errors.

use bookstore_client::rest::{
    PageParams, ResourceError, ResourceOperation, ResourcePath, RestResource,
};
use bookstore_client::{
    Author, BaseUrl, Book, BookstoreConfig, HttpError, HttpMethod, RestClient, RestError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RestClient {
    let config = BookstoreConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

/// A resource whose backend creates records with PUT and replaces them with POST.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Review {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    text: Option<String>,
}

impl RestResource for Review {
    type Id = i64;
    type QueryParams = PageParams;

    const NAME: &'static str = "Review";
    const PLURAL: &'static str = "reviews";
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Put, ResourceOperation::Save, &[], "reviews"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Update, &["id"], "reviews/{id}"),
    ];

    fn get_id(&self) -> Option<Self::Id> {
        self.id
    }
}

// ============================================================================
// query
// ============================================================================

#[tokio::test]
async fn test_query_sends_page_params_and_parses_link_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authors"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([
                    {"id": 21, "name": "Italo", "surname": "Calvino", "birthDate": "1923-10-15"},
                    {"id": 22, "name": "Ursula", "surname": "Le Guin", "birthDate": null}
                ]))
                .insert_header(
                    "link",
                    r#"</api/authors?page=3&per_page=20>; rel="next", </api/authors?page=1&per_page=20>; rel="prev", </api/authors?page=5&per_page=20>; rel="last", </api/authors?page=1&per_page=20>; rel="first""#,
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = Author::query(&client, Some(PageParams::new(2, 20)))
        .await
        .unwrap();

    assert_eq!(response.len(), 2);
    assert_eq!(response[0].surname.as_deref(), Some("Calvino"));
    assert_eq!(response[0].birth_date, NaiveDate::from_ymd_opt(1923, 10, 15));
    assert!(response[1].birth_date.is_none());

    let links = response.links();
    assert_eq!(links.len(), 4);
    assert_eq!(links.next(), Some("/api/authors?page=3&per_page=20"));
    assert_eq!(links.page_number("prev"), Some(1));
    assert_eq!(links.page_number("last"), Some(5));
}

#[tokio::test]
async fn test_query_without_link_header_has_no_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = Book::query(&client, None).await.unwrap();

    assert!(response.is_empty());
    assert!(response.links().is_empty());
    assert!(!response.has_next_page());
}

#[tokio::test]
async fn test_query_normalizes_book_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Dune", "publicationDate": "1965-08-01T00:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = Book::query(&client, Some(PageParams::new(1, 20)))
        .await
        .unwrap();

    assert_eq!(
        response[0].publication_date,
        NaiveDate::from_ymd_opt(1965, 8, 1)
    );
}

// ============================================================================
// get
// ============================================================================

#[tokio::test]
async fn test_get_book_transforms_publication_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "id": 1,
                    "title": "Dune",
                    "description": "Spice",
                    "publicationDate": "2020-01-15T00:00:00Z",
                    "price": 9.99
                }))
                .insert_header("x-request-id", "req-42"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = Book::get(&client, 1).await.unwrap();

    assert_eq!(response.request_id(), Some("req-42"));
    let book = response.into_inner();
    assert_eq!(book.id, Some(1));
    assert_eq!(book.publication_date, NaiveDate::from_ymd_opt(2020, 1, 15));
    assert_eq!(book.price, Some(9.99));
}

#[tokio::test]
async fn test_get_with_html_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>proxy login</html>")
                .insert_header("x-request-id", "req-html"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Book::get(&client, 1).await.unwrap_err();

    assert!(matches!(
        error,
        ResourceError::Rest(RestError::Http(HttpError::MalformedBody(_)))
    ));
    assert_eq!(error.status(), Some(200));
    assert_eq!(error.request_id(), Some("req-html"));
}

#[tokio::test]
async fn test_get_with_empty_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Book::get(&client, 1).await;

    assert!(matches!(
        result,
        Err(ResourceError::Deserialization { resource: "Book", .. })
    ));
}

#[tokio::test]
async fn test_query_with_empty_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authors"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Author::query(&client, None).await;

    assert!(matches!(
        result,
        Err(ResourceError::Deserialization { resource: "Author", .. })
    ));
}

#[tokio::test]
async fn test_get_missing_record_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authors/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Author::get(&client, 99).await;

    assert!(matches!(
        result,
        Err(ResourceError::NotFound { resource: "Author", ref id }) if id == "99"
    ));
}

#[tokio::test]
async fn test_get_with_unparseable_date_reports_transform_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 3, "publicationDate": "soon"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Book::get(&client, 3).await;

    assert!(matches!(result, Err(ResourceError::Transform { .. })));
}

// ============================================================================
// save / update / persist
// ============================================================================

#[tokio::test]
async fn test_save_posts_record_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/books"))
        .and(body_json(json!({
            "title": "Dune",
            "description": null,
            "publicationDate": "1965-08-01",
            "price": 9.5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10,
            "title": "Dune",
            "description": null,
            "publicationDate": "1965-08-01",
            "price": 9.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let book = Book {
        title: Some("Dune".to_string()),
        publication_date: NaiveDate::from_ymd_opt(1965, 8, 1),
        price: Some(9.5),
        ..Default::default()
    };

    let stored = book.save(&client).await.unwrap();
    assert_eq!(stored.id, Some(10));
    assert_eq!(stored.title, book.title);
}

#[tokio::test]
async fn test_update_puts_record_to_its_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/authors/5"))
        .and(body_json(json!({
            "id": 5,
            "name": "Jorge Luis",
            "surname": "Borges",
            "description": null,
            "birthDate": "1899-08-24"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "name": "Jorge Luis",
            "surname": "Borges",
            "birthDate": "1899-08-24"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let author = Author {
        id: Some(5),
        name: Some("Jorge Luis".to_string()),
        surname: Some("Borges".to_string()),
        description: None,
        birth_date: NaiveDate::from_ymd_opt(1899, 8, 24),
    };

    let stored = author.update(&client).await.unwrap();
    assert_eq!(stored, author);
}

#[tokio::test]
async fn test_update_with_empty_response_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/authors/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let author = Author {
        id: Some(3),
        name: Some("Italo".to_string()),
        ..Author::default()
    };

    assert!(author.update(&client).await.is_err());
}

#[tokio::test]
async fn test_operations_use_declared_http_method() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/reviews"))
        .and(body_json(json!({"text": "Superb"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2, "text": "Superb"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/reviews/2"))
        .and(body_json(json!({"id": 2, "text": "Superb!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2, "text": "Superb!"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let draft = Review {
        id: None,
        text: Some("Superb".to_string()),
    };

    let mut stored = draft.persist(&client).await.unwrap();
    assert_eq!(stored.id, Some(2));

    stored.text = Some("Superb!".to_string());
    let updated = stored.persist(&client).await.unwrap();
    assert_eq!(updated.text.as_deref(), Some("Superb!"));
}

#[tokio::test]
async fn test_update_without_id_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let result = Author::default().update(&client).await;

    assert!(matches!(
        result,
        Err(ResourceError::MissingId {
            resource: "Author",
            operation: "update"
        })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_persist_dispatches_on_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/books/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let created = Book::default().persist(&client).await.unwrap();
    assert_eq!(created.id, Some(1));

    let existing = Book {
        id: Some(5),
        ..Default::default()
    };
    let updated = existing.persist(&client).await.unwrap();
    assert_eq!(updated.id, Some(5));
}

#[tokio::test]
async fn test_save_validation_failure_carries_field_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/authors"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({
                    "message": "error.validation",
                    "fieldErrors": [
                        {"objectName": "author", "field": "name", "message": "NotNull"}
                    ]
                }))
                .insert_header("x-request-id", "req-7"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Author::default().save(&client).await;

    match result {
        Err(ResourceError::ValidationFailed { errors, request_id }) => {
            assert_eq!(errors.get("name"), Some(&vec!["NotNull".to_string()]));
            assert_eq!(request_id.as_deref(), Some("req-7"));
        }
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "down"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Book::query(&client, None).await;

    let error = result.unwrap_err();
    assert_eq!(error.status(), Some(503));
    assert!(matches!(error, ResourceError::Rest(_)));
}

// ============================================================================
// delete
// ============================================================================

#[tokio::test]
async fn test_delete_sends_delete_to_record_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/books/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    Book::delete(&client, 7).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_record_maps_to_not_found() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let result = Author::delete(&client, 404).await;
    assert!(matches!(result, Err(ResourceError::NotFound { .. })));
}
