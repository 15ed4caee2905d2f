//! Wire-level client for the balance.fun API: endpoint paths, the fixed
//! header set, and the shared form-POST primitive every call goes through.

use core_logic::{NetworkError, ProxyConfig};
use reqwest::header::{
    HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

pub const DEFAULT_BASE_URL: &str = "https://balance.fun";

pub const WALLET_LOGIN: &str = "/api/wallet_login";
pub const CREDIT_REFRESH: &str = "/api/credit_refresh";
pub const LOGIN_REFRESH: &str = "/api/login_refresh";
pub const INVITE_LIST: &str = "/api/invite_list";
pub const TOKEN_LIST: &str = "/api/token_list";
pub const NFT_LIST: &str = "/api/nft_list";
pub const REDIRECT_FOLLOW: &str = "/api/redirect_follow";

/// The informational batch, issued in exactly this order after login.
pub const INFO_ENDPOINTS: [&str; 5] = [
    CREDIT_REFRESH,
    LOGIN_REFRESH,
    INVITE_LIST,
    TOKEN_LIST,
    NFT_LIST,
];

/// Quest identifier for the "follow" claim.
pub const FOLLOW_TYPE: u32 = 2;
/// Credits granted server-side for a successful follow claim.
pub const QUEST_REWARD_CREDITS: u32 = 200;

/// Total per-request deadline.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One wallet's HTTP client. Owns the session token once login succeeds;
/// every request after that carries it in the Authorization header.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    referer: String,
    user_agent: String,
    wallet: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        invite_code: &str,
        user_agent: String,
        wallet: String,
        proxy: Option<&ProxyConfig>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));

        if let Some(p) = proxy {
            let proxied = reqwest::Proxy::all(p.url())?.basic_auth(&p.username, &p.password);
            builder = builder.proxy(proxied);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            referer: format!(
                "{}/account?invite_code={}",
                base_url.trim_end_matches('/'),
                invite_code
            ),
            user_agent,
            wallet,
            token: None,
        })
    }

    /// Attaches the session token returned by login to all later requests.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Shared request primitive: form-encoded POST with the fixed header
    /// set. Status 200 yields the parsed JSON body; any other status is
    /// logged and yields `None` - absence, not an error, is the signal the
    /// protocol steps consume. Only transport failures are `Err`.
    pub async fn post(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> Result<Option<Value>, NetworkError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(ACCEPT_LANGUAGE, "en-GB,en;q=0.9")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ORIGIN, self.base_url.as_str())
            .header(REFERER, self.referer.as_str())
            .header(USER_AGENT, self.user_agent.as_str());

        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(token).map_err(|_| NetworkError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: "session token is not a valid header value".to_string(),
            })?;
            request = request.header(AUTHORIZATION, value);
        }

        info!("Wallet {} sending request to {}", self.wallet, url);

        let response = request.form(form).send().await.map_err(|e| {
            if e.is_timeout() {
                NetworkError::Timeout {
                    endpoint: endpoint.to_string(),
                }
            } else {
                NetworkError::ConnectionFailed {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!(
                "Error {}: wallet {} got no valid response from {}",
                status.as_u16(),
                self.wallet,
                url
            );
            return Ok(None);
        }

        let body: Value =
            response
                .json()
                .await
                .map_err(|e| NetworkError::InvalidResponse {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;

        info!(
            "Wallet {} got response {} from {}",
            self.wallet, body, url
        );
        Ok(Some(body))
    }
}
