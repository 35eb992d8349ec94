use chat_dispatcher::error::ClientError;
use chat_dispatcher::message::{ChatRequest, ChatResponse};
use chat_dispatcher::{ChatTransport, ClientConfig, Origin, PageState, SendOutcome};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot};

/// Answers every request with the same canned result and remembers what it saw.
#[derive(Clone)]
struct CannedTransport {
    response: Result<ChatResponse, &'static str>,
    seen: Arc<Mutex<Vec<ChatRequest>>>,
}

impl CannedTransport {
    fn replying(resp: ChatResponse) -> Self {
        Self { response: Ok(resp), seen: Arc::default() }
    }

    fn undecodable(body: &'static str) -> Self {
        Self { response: Err(body), seen: Arc::default() }
    }
}

impl ChatTransport for CannedTransport {
    async fn post_message(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        self.seen.lock().await.push(request.clone());
        match &self.response {
            Ok(resp) => Ok(resp.clone()),
            Err(body) => Err(ClientError::Decode {
                source: serde_json::from_str::<ChatResponse>(body).unwrap_err(),
                body: body.to_string(),
            }),
        }
    }
}

/// Holds each request until the test releases its response.
#[derive(Clone, Default)]
struct GatedTransport {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<ChatResponse>>>>,
}

impl GatedTransport {
    async fn gate(&self, message: &str) -> oneshot::Sender<ChatResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().await.insert(message.to_string(), rx);
        tx
    }
}

impl ChatTransport for GatedTransport {
    async fn post_message(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let rx = self.gates.lock().await.remove(&request.message).unwrap();
        Ok(rx.await.unwrap())
    }
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    for blank in ["", "   ", "\n\t "] {
        let page = PageState::new();
        let transport = CannedTransport::replying(ChatResponse::reply("unused"));
        let dispatcher = page.dispatcher(transport.clone(), &ClientConfig::default());

        page.input.set(blank).await;
        let outcome = dispatcher.send_message().await;

        assert!(matches!(outcome, SendOutcome::Skipped));
        assert!(page.transcript.is_empty().await);
        assert!(transport.seen.lock().await.is_empty());
        assert_eq!(page.input.value().await, blank);
    }
}

#[tokio::test]
async fn test_input_is_trimmed_and_cleared() {
    let page = PageState::new();
    let transport = CannedTransport::replying(ChatResponse::reply("Hello"));
    let dispatcher = page.dispatcher(transport.clone(), &ClientConfig::default());

    page.input.set("  hi  ").await;
    dispatcher.send_message().await;

    let user = page.transcript.latest(Origin::User).await.unwrap();
    assert_eq!(user.text, "hi");
    assert_eq!(page.input.value().await, "");
    assert_eq!(*transport.seen.lock().await, vec![ChatRequest::new("hi")]);
}

#[tokio::test]
async fn test_user_entry_precedes_request() {
    let page = PageState::new();
    let transport = GatedTransport::default();
    let dispatcher = page.dispatcher(transport.clone(), &ClientConfig::default());
    let release = transport.gate("ping").await;

    page.input.set("ping").await;
    let request = dispatcher.capture().await.unwrap();

    // Rendered and cleared before anything went over the wire.
    assert_eq!(page.transcript.count(Origin::User).await, 1);
    assert_eq!(page.input.value().await, "");

    let pending = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.deliver(request).await }
    });
    release.send(ChatResponse::reply("pong")).unwrap();
    assert!(matches!(pending.await.unwrap(), SendOutcome::Replied(_)));
}

#[tokio::test]
async fn test_reply_renders_bot_entry() {
    let page = PageState::new();
    let dispatcher =
        page.dispatcher(CannedTransport::replying(ChatResponse::reply("Hello")), &ClientConfig::default());

    page.input.set("hi").await;
    let outcome = dispatcher.send_message().await;

    assert_eq!(outcome.entry().unwrap().text, "Hello");
    assert_eq!(page.transcript.count(Origin::Bot).await, 1);
    assert_eq!(page.transcript.count(Origin::Error).await, 0);
    assert_eq!(page.transcript.latest(Origin::Bot).await.unwrap().text, "Hello");
}

#[tokio::test]
async fn test_server_error_renders_warning() {
    let page = PageState::new();
    let dispatcher = page.dispatcher(
        CannedTransport::replying(ChatResponse::error("Service unavailable")),
        &ClientConfig::default(),
    );

    page.input.set("hi").await;
    let outcome = dispatcher.send_message().await;

    assert!(matches!(outcome, SendOutcome::ServerError(_)));
    assert_eq!(page.transcript.count(Origin::Bot).await, 0);
    assert_eq!(page.transcript.count(Origin::Error).await, 1);
    assert_eq!(
        page.transcript.latest(Origin::Error).await.unwrap().text,
        "⚠️ Error: Service unavailable"
    );
}

#[tokio::test]
async fn test_empty_reply_is_treated_as_error() {
    let page = PageState::new();
    let resp = ChatResponse { reply: Some(String::new()), error: Some("empty".into()), details: None };
    let dispatcher = page.dispatcher(CannedTransport::replying(resp), &ClientConfig::default());

    page.input.set("hi").await;
    let outcome = dispatcher.send_message().await;

    assert!(matches!(outcome, SendOutcome::ServerError(_)));
    assert_eq!(page.transcript.count(Origin::Bot).await, 0);
}

#[tokio::test]
async fn test_transport_failure_renders_warning() {
    let page = PageState::new();
    let config = ClientConfig::builder().with_warning_prefix("!! ").build().unwrap();
    let dispatcher = page.dispatcher(CannedTransport::undecodable("<html>"), &config);

    page.input.set("hi").await;
    let outcome = dispatcher.send_message().await;

    assert!(matches!(outcome, SendOutcome::TransportError(_)));
    let warning = page.transcript.latest(Origin::Error).await.unwrap();
    assert!(warning.text.starts_with("!! invalid response body"), "got {:?}", warning.text);
    assert_eq!(page.transcript.len().await, 2);
    assert_eq!(page.input.value().await, "");
}

#[tokio::test]
async fn test_out_of_order_replies_keep_every_entry() {
    let page = PageState::new();
    let transport = GatedTransport::default();
    let dispatcher = page.dispatcher(transport.clone(), &ClientConfig::default());
    let first_gate = transport.gate("first").await;
    let second_gate = transport.gate("second").await;

    page.input.set("first").await;
    let first = dispatcher.capture().await.unwrap();
    page.input.set("second").await;
    let second = dispatcher.capture().await.unwrap();

    let first_task = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.deliver(first).await }
    });
    let second_task = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move { dispatcher.deliver(second).await }
    });

    second_gate.send(ChatResponse::reply("reply to second")).unwrap();
    second_task.await.unwrap();
    first_gate.send(ChatResponse::reply("reply to first")).unwrap();
    first_task.await.unwrap();

    let texts: Vec<String> = page.transcript.entries().await.into_iter().map(|e| e.text).collect();
    assert_eq!(texts, vec!["first", "second", "reply to second", "reply to first"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_typing_during_capture_is_never_lost() {
    for _ in 0..200 {
        let page = PageState::new();
        let dispatcher = page.dispatcher(
            CannedTransport::replying(ChatResponse::reply("unused")),
            &ClientConfig::default(),
        );
        page.input.set("first").await;

        let typing = tokio::spawn({
            let input = page.input.clone();
            async move { input.set("next").await }
        });
        let captured = dispatcher.capture().await.unwrap();
        typing.await.unwrap();

        // Either the new text was captured, or it survives the clear.
        match captured.message.as_str() {
            "first" => assert_eq!(page.input.value().await, "next"),
            "next" => assert_eq!(page.input.value().await, ""),
            other => panic!("unexpected capture {other:?}"),
        }
    }
}
