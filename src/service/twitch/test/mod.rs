use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use crate::{
    error::twitch::TwitchError,
    model::{
        stream::{LiveStatus, LiveStream},
        twitch::AccessCredential,
    },
    service::twitch::{
        credential::{CredentialExchange, CredentialProvider, IssuedToken},
        helix::StreamStatusClient,
        status::StatusChecker,
    },
    util::clock::Clock,
};


/// Issues `token-1`, `token-2`, ... and counts exchanges.
struct CountingExchange {
    calls: AtomicUsize,
    expires_in: Option<Duration>,
    fail: bool,
}

impl CountingExchange {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            expires_in: Some(Duration::from_secs(3600)),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialExchange for CountingExchange {
    async fn exchange(&self) -> Result<IssuedToken, TwitchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::task::yield_now().await;

        if self.fail {
            return Err(TwitchError::TokenExchange("invalid client".to_string()));
        }

        Ok(IssuedToken {
            token: format!("token-{}", call),
            expires_in: self.expires_in,
        })
    }
}

struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
        }
    }

    fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Answers 401 for every token listed in `rejected`, live otherwise.
struct TokenCheckingClient {
    rejected: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl TokenCheckingClient {
    fn rejecting(tokens: &[&str]) -> Self {
        Self {
            rejected: tokens.iter().map(|t| t.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn tokens_used(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StreamStatusClient for TokenCheckingClient {
    async fn get_live_status(
        &self,
        login: &str,
        credential: &AccessCredential,
    ) -> Result<LiveStatus, TwitchError> {
        self.calls.lock().unwrap().push(credential.token.clone());
        tokio::task::yield_now().await;

        if self.rejected.contains(&credential.token) {
            return Err(TwitchError::Unauthorized);
        }

        Ok(LiveStatus::Live(LiveStream {
            stream_id: "S1".to_string(),
            streamer_login: login.to_string(),
            streamer_display_name: login.to_string(),
            title: String::new(),
            game_name: String::new(),
            viewer_count: 0,
            thumbnail_url: String::new(),
            started_at: Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap(),
        }))
    }
}

fn provider(exchange: Arc<CountingExchange>, clock: Arc<ManualClock>) -> Arc<CredentialProvider> {
    Arc::new(CredentialProvider::new(exchange, clock))
}
