use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use vectara_chain::graph::nodes::VECTARA_STORE_INPUT;
use vectara_chain::graph::{ChainNode, NodeData, NodeInput};
use vectara_chain::store::ContextWindow;
use vectara_chain::vectara::{SummarizerConfig, VectaraClient};
use vectara_chain::{ChainError, UpstreamError, VectaraFilter, VectaraQaChainNode, VectaraStore};

type Captured = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

#[derive(Clone)]
struct MockProvider {
    status: StatusCode,
    reply: Value,
    captured: Captured,
}

async fn query_handler(
    State(provider): State<MockProvider>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    provider.captured.lock().unwrap().push((headers, body));
    (provider.status, Json(provider.reply.clone()))
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn spawn_provider(status: StatusCode, reply: Value) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let provider = MockProvider {
        status,
        reply,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/v1/query", post(query_handler))
        .with_state(provider);

    (serve(app).await, captured)
}

fn node_data(store: VectaraStore) -> NodeData {
    NodeData::new("vectaraQAChain_0")
        .with_input(VECTARA_STORE_INPUT, NodeInput::VectorStore(Arc::new(store)))
}

fn summary_reply(status: Value) -> Value {
    json!({
        "responseSet": [{
            "response": [],
            "document": [],
            "summary": [{ "status": status }]
        }]
    })
}

#[tokio::test]
async fn answers_query_with_summary_and_sources() {
    let reply = json!({
        "responseSet": [{
            "response": [{
                "text": "X is Y according to the handbook.",
                "score": 0.87,
                "metadata": [
                    { "name": "lang", "value": "eng" },
                    { "name": "section", "value": "2" }
                ],
                "documentIndex": 0
            }],
            "document": [{
                "id": "handbook.pdf",
                "metadata": [
                    { "name": "title", "value": "Handbook" },
                    { "name": "section", "value": "appendix" }
                ]
            }],
            "summary": [{ "text": "X is Y", "status": [] }],
            "status": []
        }]
    });
    let (base_url, captured) = spawn_provider(StatusCode::OK, reply).await;
    let node = VectaraQaChainNode::with_client(VectaraClient::new(base_url));
    let store = VectaraStore::new("1234", vec![7], "zqt_test");

    let output = node
        .run(&node_data(store), "what is X")
        .await
        .expect("query should succeed");

    assert_eq!(
        serde_json::to_value(&output).unwrap(),
        json!({
            "text": "X is Y",
            "sourceDocuments": [{
                "pageContent": "X is Y according to the handbook.",
                "metadata": { "lang": "eng", "section": "appendix", "title": "Handbook" }
            }]
        })
    );

    let requests = captured.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (headers, body) = &requests[0];
    assert_eq!(headers.get("x-api-key").unwrap(), "zqt_test");
    assert_eq!(headers.get("customer-id").unwrap(), "1234");
    assert_eq!(body["query"][0]["query"], json!("what is X"));
    assert_eq!(body["query"][0]["numResults"], json!(4));
    assert_eq!(
        body["query"][0]["corpusKey"],
        json!([{
            "customerId": "1234",
            "corpusId": 7,
            "metadataFilter": "",
            "lexicalInterpolationConfig": { "lambda": 0.025 }
        }])
    );
}

#[tokio::test]
async fn forwards_store_filter_and_custom_summarizer() {
    let reply = json!({
        "responseSet": [{ "response": [], "document": [], "summary": [{ "text": "none" }] }]
    });
    let (base_url, captured) = spawn_provider(StatusCode::OK, reply).await;
    let summarizer = SummarizerConfig {
        prompt_name: "vectara-summary-ext-v1.2.0".to_string(),
        response_lang: "de".to_string(),
        max_summarized_results: 3,
    };
    let node =
        VectaraQaChainNode::with_client(VectaraClient::new(base_url)).with_summarizer(summarizer);
    let store = VectaraStore::new("9", vec![1, 2], "key")
        .with_k(10)
        .with_filter(VectaraFilter {
            filter: Some("doc.lang = 'de'".to_string()),
            lambda: Some(0.1),
            context_config: Some(ContextWindow {
                sentences_before: Some(1),
                sentences_after: Some(3),
            }),
        });

    node.run(&node_data(store), "wer ist X")
        .await
        .expect("query should succeed");

    let requests = captured.lock().unwrap();
    let body = &requests[0].1["query"][0];
    assert_eq!(body["numResults"], json!(10));
    assert_eq!(
        body["contextConfig"],
        json!({ "sentencesAfter": 3, "sentencesBefore": 1 })
    );
    assert_eq!(body["corpusKey"].as_array().unwrap().len(), 2);
    assert_eq!(body["corpusKey"][1]["metadataFilter"], json!("doc.lang = 'de'"));
    assert_eq!(
        body["summary"],
        json!([{
            "summarizerPromptName": "vectara-summary-ext-v1.2.0",
            "responseLang": "de",
            "maxSummarizedResults": 3
        }])
    );
}

#[tokio::test]
async fn non_ok_status_reports_code() {
    let (base_url, _) =
        spawn_provider(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })).await;
    let node = VectaraQaChainNode::with_client(VectaraClient::new(base_url));

    let err = node
        .run(&node_data(VectaraStore::new("1", vec![1], "k")), "q")
        .await
        .unwrap_err();

    assert!(matches!(err, ChainError::Upstream(UpstreamError::Status(500))));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn summarizer_overload_is_bad_request() {
    let reply = summary_reply(json!([{ "code": "BAD_REQUEST", "statusDetail": "too long" }]));
    let (base_url, _) = spawn_provider(StatusCode::OK, reply).await;
    let node = VectaraQaChainNode::with_client(VectaraClient::new(base_url));

    let err = node
        .run(&node_data(VectaraStore::new("1", vec![1], "k")), "q")
        .await
        .unwrap_err();

    assert!(matches!(err, ChainError::Upstream(UpstreamError::BadRequest)));
    assert!(err.to_string().contains("reducing the number of search results"));
}

#[tokio::test]
async fn unknown_summarizer_names_profile() {
    let reply = summary_reply(json!([{
        "code": "NOT_FOUND",
        "statusDetail": "Failed to retrieve summarizer."
    }]));
    let (base_url, _) = spawn_provider(StatusCode::OK, reply).await;
    let node = VectaraQaChainNode::with_client(VectaraClient::new(base_url));

    let err = node
        .run(&node_data(VectaraStore::new("1", vec![1], "k")), "q")
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("vectara-experimental-summary-ext-2023-10-23-med"));
}

#[tokio::test]
async fn malformed_body_is_generic_upstream_error() {
    let app = Router::new().route("/v1/query", post(|| async { "<html>not json</html>" }));
    let base_url = serve(app).await;
    let node = VectaraQaChainNode::with_client(VectaraClient::new(base_url));

    let err = node
        .run(&node_data(VectaraStore::new("1", vec![1], "k")), "q")
        .await
        .unwrap_err();

    assert!(matches!(err, ChainError::Upstream(UpstreamError::Generic(_))));
}

#[tokio::test]
async fn unreachable_provider_is_generic_upstream_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let node = VectaraQaChainNode::with_client(VectaraClient::new(base_url));

    let err = node
        .run(&node_data(VectaraStore::new("1", vec![1], "k")), "q")
        .await
        .unwrap_err();

    assert!(matches!(err, ChainError::Upstream(UpstreamError::Generic(_))));
}
