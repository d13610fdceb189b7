use crate::core::formatter::format_result;
use crate::core::normalizer::parse_input;
use crate::domain::model::Reply;
use crate::domain::ports::LookupService;

/// Normalizer → validator → lookup → formatter, one pass per message.
pub struct LookupPipeline<L: LookupService> {
    service: L,
}

impl<L: LookupService> LookupPipeline<L> {
    pub fn new(service: L) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &L {
        &self.service
    }

    /// Resolve the reply text for one raw user message.
    pub async fn resolve(&self, raw: &str) -> Reply {
        let id = match parse_input(raw) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!("Rejected input {:?}: {}", raw, e);
                return Reply::Plain(e.user_message().to_string());
            }
        };

        let result = self.service.lookup(&id).await;
        Reply::Markdown(format_result(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Identifier, LookupResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockService {
        result: LookupResult,
        calls: AtomicUsize,
        last_id: Mutex<Option<String>>,
    }

    impl MockService {
        fn new(result: LookupResult) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
                last_id: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl LookupService for MockService {
        async fn lookup(&self, id: &Identifier) -> LookupResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_id.lock().unwrap() = Some(id.to_string());
            self.result.clone()
        }
    }

    fn not_banned() -> LookupResult {
        LookupResult::Success {
            id: "123456789".to_string(),
            banned: false,
            ban_code: "0".to_string(),
            message: "ok".to_string(),
            credits_url: "https://t.me/ngxjs".to_string(),
        }
    }

    #[tokio::test]
    async fn test_plain_id_reaches_service() {
        let pipeline = LookupPipeline::new(MockService::new(not_banned()));

        let reply = pipeline.resolve(" 123456789 ").await;

        assert!(reply.is_lookup());
        assert!(reply.text().contains("*Banido:* Não"));
        assert_eq!(pipeline.service().calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            pipeline.service().last_id.lock().unwrap().as_deref(),
            Some("123456789")
        );
    }

    #[tokio::test]
    async fn test_uid_url_reaches_service() {
        let pipeline = LookupPipeline::new(MockService::new(not_banned()));

        pipeline
            .resolve("https://x.test/?foo=1&uid=987654321")
            .await;

        assert_eq!(
            pipeline.service().last_id.lock().unwrap().as_deref(),
            Some("987654321")
        );
    }

    #[tokio::test]
    async fn test_missing_uid_stops_before_lookup() {
        let pipeline = LookupPipeline::new(MockService::new(not_banned()));

        let reply = pipeline.resolve("https://x.test/?foo=1").await;

        assert_eq!(
            reply,
            Reply::Plain(
                "A URL não contém o parâmetro 'uid'. Por favor, envie um ID válido.".to_string()
            )
        );
        assert_eq!(pipeline.service().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_id_stops_before_lookup() {
        let pipeline = LookupPipeline::new(MockService::new(not_banned()));

        let reply = pipeline.resolve("abc").await;

        assert_eq!(
            reply,
            Reply::Plain(
                "Por favor, insira um ID válido (somente números com 5 a 15 dígitos).".to_string()
            )
        );
        assert_eq!(pipeline.service().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_formatted() {
        let pipeline = LookupPipeline::new(MockService::new(LookupResult::TransportError {
            detail: "timed out".to_string(),
        }));

        let reply = pipeline.resolve("123456789").await;

        assert_eq!(
            reply,
            Reply::Markdown("Erro ao acessar a API\\. Detalhes: timed out".to_string())
        );
    }
}
