//! Chat-completion client.
//!
//! One explicitly constructed service object owns the HTTP client, the
//! reply cache and the interval limiter for the process lifetime; the
//! composition root creates it once and hands request handlers a reference.

use crate::{ApiConfig, StreamHandler, parse::parse_replies, sse, typing};
use futures_util::StreamExt;
use retort_cache::{ReplyCache, ReplyCacheConfig};
use retort_core::{ChatRequest, ChatResponse, MAX_TOKENS, Reply, TEMPERATURE, conversation};
use retort_error::ClientError;
use retort_rate_limit::IntervalLimiter;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument};

/// Pause per emitted character increment.
pub const CHAR_DELAY: Duration = Duration::from_millis(30);

/// Pause between replies during simulated typing.
pub const REPLY_DELAY: Duration = Duration::from_millis(200);

/// Client for the upstream chat-completion endpoint.
///
/// Exposes a full-response entry point ([`Self::generate`]) and a
/// streaming one ([`Self::generate_stream`]). Both check the reply cache
/// before gating on the interval limiter, so a cache hit neither waits
/// nor counts against the interval.
pub struct RebuttalClient {
    client: reqwest::Client,
    config: ApiConfig,
    cache: Mutex<ReplyCache>,
    limiter: IntervalLimiter,
    char_delay: Duration,
    reply_delay: Duration,
}

impl RebuttalClient {
    /// Creates a client with default cache TTL, interval and pacing.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            cache: Mutex::new(ReplyCache::new(ReplyCacheConfig::default())),
            limiter: IntervalLimiter::new(),
            char_delay: CHAR_DELAY,
            reply_delay: REPLY_DELAY,
        }
    }

    /// Overrides the emission pacing. Zero delays make tests fast.
    pub fn with_timing(mut self, char_delay: Duration, reply_delay: Duration) -> Self {
        self.char_delay = char_delay;
        self.reply_delay = reply_delay;
        self
    }

    /// Overrides the interval limiter.
    pub fn with_limiter(mut self, limiter: IntervalLimiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// The endpoint configuration in use.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Generates up to three replies in one full-response call.
    ///
    /// Checks the cache first; on a miss, waits for the interval limiter,
    /// issues the request, caches the raw completion text and splits it
    /// into discrete replies.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] carrying a user-displayable message for
    /// configuration, transport, upstream and protocol failures.
    #[instrument(skip(self, opponent_message))]
    pub async fn generate(
        &self,
        opponent_message: &str,
        intensity: u8,
    ) -> Result<Vec<String>, ClientError> {
        self.config.validate()?;

        let messages = conversation(opponent_message, intensity);
        let fingerprint = ReplyCache::fingerprint(&messages, intensity);

        if let Some(text) = self.cached_text(&fingerprint).await {
            debug!("cache hit, skipping upstream call");
            return Ok(parse_replies(&text));
        }

        self.limiter.await_turn().await;

        let request = ChatRequest::builder()
            .model(self.config.model().clone())
            .messages(messages)
            .stream(Some(false))
            .max_tokens(Some(MAX_TOKENS))
            .temperature(Some(TEMPERATURE))
            .build()
            .map_err(|e| ClientError::Builder(e.to_string()))?;

        debug!(url = %self.config.api_base_url(), "sending completion request");
        let response = self.post(&request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::upstream(status.as_u16(), &body);
            error!(status = status.as_u16(), "upstream rejected request");
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::ResponseParsing(e.to_string()))?;

        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or(ClientError::EmptyChoices)?;

        self.cache
            .lock()
            .await
            .put(fingerprint, content.clone());

        Ok(parse_replies(&content))
    }

    /// Generates replies as an incremental stream.
    ///
    /// A cache hit is replayed through the simulated-typing emitter
    /// without touching the network or the limiter. On a miss the
    /// upstream SSE stream is decoded and every content delta is handed
    /// to the handler as it arrives; the accumulated text is cached and
    /// `on_complete` fires when the terminal sentinel is observed or the
    /// stream closes. All failures after validation are delivered through
    /// `on_error`; a fired `cancel` stops emission without a terminal
    /// callback.
    #[instrument(skip(self, opponent_message, handler, cancel))]
    pub async fn generate_stream<H: StreamHandler>(
        &self,
        opponent_message: &str,
        intensity: u8,
        cancel: &CancellationToken,
        handler: &mut H,
    ) {
        if let Err(e) = self.config.validate() {
            handler.on_error(e.into());
            return;
        }

        let messages = conversation(opponent_message, intensity);
        let fingerprint = ReplyCache::fingerprint(&messages, intensity);

        if let Some(text) = self.cached_text(&fingerprint).await {
            debug!("cache hit, replaying through simulated typing");
            let replies = parse_replies(&text);
            let cards = typing::type_out(
                handler,
                &replies,
                self.char_delay,
                self.reply_delay,
                cancel,
            )
            .await;
            if cancel.is_cancelled() {
                return;
            }
            let full_text = cards
                .iter()
                .map(|card: &Reply| card.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            handler.on_complete(&full_text);
            return;
        }

        self.limiter.await_turn().await;

        let request = match ChatRequest::builder()
            .model(self.config.model().clone())
            .messages(messages)
            .stream(Some(true))
            .max_tokens(Some(MAX_TOKENS))
            .temperature(Some(TEMPERATURE))
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                handler.on_error(ClientError::Builder(e.to_string()));
                return;
            }
        };

        debug!(url = %self.config.api_base_url(), "opening completion stream");
        let response = match self.post(&request).await {
            Ok(response) => response,
            Err(e) => {
                handler.on_error(e);
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "upstream rejected stream request");
            handler.on_error(ClientError::upstream(status.as_u16(), &body));
            return;
        }

        let mut decoder = sse::SseDecoder::new();
        let mut stream = response.bytes_stream();

        'read: while let Some(chunk) = stream.next().await {
            if cancel.is_cancelled() {
                debug!("stream cancelled by caller");
                return;
            }

            let bytes = match chunk {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!(%e, "stream read failed");
                    handler.on_error(ClientError::Network(e.to_string()));
                    return;
                }
            };

            for event in decoder.feed(&bytes) {
                match event {
                    sse::SseEvent::Delta(delta) => {
                        handler.on_message(&delta);
                        sleep(self.char_delay).await;
                    }
                    sse::SseEvent::Done => break 'read,
                }
            }
        }

        // A stream that closes without the sentinel still finalizes with
        // whatever was accumulated. An empty completion is not cached, so
        // the next identical request retries upstream.
        let full_text = decoder.into_text();
        if !full_text.is_empty() {
            self.cache
                .lock()
                .await
                .put(fingerprint, full_text.clone());
        }
        handler.on_complete(&full_text);
    }

    async fn cached_text(&self, fingerprint: &str) -> Option<String> {
        self.cache
            .lock()
            .await
            .get(fingerprint)
            .map(|entry| entry.text().clone())
    }

    async fn post(&self, request: &ChatRequest) -> Result<reqwest::Response, ClientError> {
        self.client
            .post(self.config.api_base_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key()),
            )
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(%e, "HTTP request failed");
                ClientError::Network(e.to_string())
            })
    }
}
