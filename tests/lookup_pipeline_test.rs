use httpmock::prelude::*;
use std::time::Duration;
use uid_ban_checker::{HttpLookupClient, LookupPipeline, Reply};
use url::Url;

fn pipeline_for(server: &MockServer) -> LookupPipeline<HttpLookupClient> {
    let api_url = Url::parse(&server.url("/api/check")).unwrap();
    let client = HttpLookupClient::new(api_url, Duration::from_secs(5)).unwrap();
    LookupPipeline::new(client)
}

#[tokio::test]
async fn test_end_to_end_banned_user() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/check")
            .query_param("uid", "123456789");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "status": "success",
                "is_banned": 1,
                "period": "X12",
                "message": "Banned for spam",
                "uid": "123456789"
            }));
    });

    let reply = pipeline_for(&server).resolve("123456789").await;

    api_mock.assert();
    let Reply::Markdown(text) = reply else {
        panic!("expected a lookup reply");
    };
    assert!(text.contains("🔒 *ID:* 123456789"));
    assert!(text.contains("*Banido:* Sim"));
    assert!(text.contains("*Ban Code:* `X12`"));
    assert!(text.contains("Banned for spam"));
    assert!(!text.replace("\\.", "").contains('.'));
}

#[tokio::test]
async fn test_end_to_end_url_input_with_defaults() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/check")
            .query_param("uid", "987654321");
        then.status(200)
            .json_body(serde_json::json!({"status": "success", "is_banned": 0}));
    });

    let reply = pipeline_for(&server)
        .resolve("https://x.test/?foo=1&uid=987654321")
        .await;

    api_mock.assert();
    let text = reply.text();
    assert!(text.contains("🔒 *ID:* 987654321"));
    assert!(text.contains("*Banido:* Não"));
    assert!(!text.contains("Ban Code"));
    assert!(text.contains("Mensagem não especificada\\."));
    assert!(text.contains("[@ngxjs](https://t\\.me/ngxjs)"));
}

#[tokio::test]
async fn test_end_to_end_api_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/check");
        then.status(200)
            .json_body(serde_json::json!({"status": "error", "message": "UID inválido"}));
    });

    let reply = pipeline_for(&server).resolve("55555").await;

    api_mock.assert();
    assert_eq!(reply, Reply::Markdown("Erro da API: UID inválido".to_string()));
}

#[tokio::test]
async fn test_end_to_end_http_failure() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/check");
        then.status(503);
    });

    let reply = pipeline_for(&server).resolve("55555").await;

    api_mock.assert();
    assert!(reply.is_lookup());
    assert!(reply
        .text()
        .starts_with("Erro ao acessar a API\\. Detalhes: "));
    assert!(reply.text().contains("503"));
}

#[tokio::test]
async fn test_end_to_end_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/check");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({"status": "success"}));
    });

    let api_url = Url::parse(&server.url("/api/check")).unwrap();
    let client = HttpLookupClient::new(api_url, Duration::from_millis(300)).unwrap();
    let reply = LookupPipeline::new(client).resolve("55555").await;

    assert!(reply
        .text()
        .starts_with("Erro ao acessar a API\\. Detalhes: "));
}

#[tokio::test]
async fn test_invalid_inputs_never_hit_the_api() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/api/check");
        then.status(200)
            .json_body(serde_json::json!({"status": "success"}));
    });
    let pipeline = pipeline_for(&server);

    let missing_uid = pipeline.resolve("https://x.test/?foo=1").await;
    let not_digits = pipeline.resolve("abc").await;
    let too_short = pipeline.resolve("1234").await;

    api_mock.assert_hits(0);
    assert_eq!(
        missing_uid,
        Reply::Plain(
            "A URL não contém o parâmetro 'uid'. Por favor, envie um ID válido.".to_string()
        )
    );
    assert_eq!(
        not_digits,
        Reply::Plain(
            "Por favor, insira um ID válido (somente números com 5 a 15 dígitos).".to_string()
        )
    );
    assert_eq!(too_short, not_digits);
}
