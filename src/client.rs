//! 后端 API 客户端
//! 请求管道：默认头、Bearer 认证、超时、token 过期时单次刷新重试、结果统一为信封

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex as TokioMutex};
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::auth::{RefreshTokenRequest, TokenData};
use crate::models::ApiResponse;

/// 刷新 token 的端点
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// 单次请求的描述
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// 为 false 时不附加 Authorization 头
    pub include_auth: bool,
    /// 额外请求头，覆盖同名默认头
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            include_auth: true,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: Option<Value>) -> Self {
        Self {
            method: Method::PUT,
            body,
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    /// 不携带认证信息
    pub fn without_auth(mut self) -> Self {
        self.include_auth = false;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// 登出原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// 调用方主动登出
    UserRequested,
    /// 需要刷新但本地没有 refresh token
    MissingRefreshToken,
    /// 刷新端点拒绝了 refresh token
    RefreshRejected,
    /// 刷新请求本身失败（超时、连接错误）
    RefreshFailed,
}

/// 登出通知，宿主应用订阅后自行处理页面跳转等
#[derive(Debug, Clone)]
pub struct LogoutEvent {
    pub reason: LogoutReason,
    pub at: DateTime<Utc>,
}

/// 刷新结果
enum RefreshOutcome {
    Renewed,
    Rejected,
}

/// [`ApiClient`] 构建器
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    session: Option<Arc<Session>>,
    logout_on_refresh_transport_error: bool,
}

impl ApiClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            session: None,
            logout_on_refresh_transport_error: true,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// 刷新请求遇到网络错误时是否清除凭据
    pub fn logout_on_refresh_transport_error(mut self, enabled: bool) -> Self {
        self.logout_on_refresh_transport_error = enabled;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let parsed = url::Url::parse(&self.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let (logout_tx, _) = broadcast::channel(16);

        Ok(ApiClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: self.timeout,
            session: self.session.unwrap_or_else(|| Arc::new(Session::in_memory())),
            refresh_lock: TokioMutex::new(()),
            logout_tx,
            logout_on_refresh_transport_error: self.logout_on_refresh_transport_error,
        })
    }
}

/// 后端 API 客户端
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    session: Arc<Session>,
    /// 同一时刻最多一个刷新请求
    refresh_lock: TokioMutex<()>,
    logout_tx: broadcast::Sender<LogoutEvent>,
    logout_on_refresh_transport_error: bool,
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// 按配置创建客户端
    pub fn from_config(config: &ClientConfig, session: Arc<Session>) -> Result<Self> {
        Self::builder(config.base_url())
            .timeout(config.timeout())
            .session(session)
            .logout_on_refresh_transport_error(config.session.logout_on_refresh_transport_error)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// 订阅登出通知
    pub fn subscribe_logout(&self) -> broadcast::Receiver<LogoutEvent> {
        self.logout_tx.subscribe()
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 发送请求
    ///
    /// 永不返回错误：网络层失败转换为 `success=false` 的连接错误信封。
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ApiResponse {
        match self.try_request(endpoint, &options).await {
            Ok(response) => {
                metrics::counter!("api_client_requests_total", "outcome" => "completed")
                    .increment(1);
                response
            }
            Err(e) => {
                warn!(
                    method = %options.method,
                    endpoint,
                    error = %e,
                    "Request failed"
                );
                let outcome = match &e {
                    ClientError::Timeout(_) => "timeout",
                    e if e.is_network() => "network_error",
                    _ => "client_error",
                };
                metrics::counter!("api_client_requests_total", "outcome" => outcome).increment(1);
                ApiResponse::connection_error(&e)
            }
        }
    }

    async fn try_request(&self, endpoint: &str, options: &RequestOptions) -> Result<ApiResponse> {
        let url = self.url_for(endpoint);

        // 记录发送时看到的 token，用于判断是否已被并发刷新替换
        let observed = self.session.access_token();
        let auth = if options.include_auth { observed.as_deref() } else { None };

        let response = self.send(&url, options, auth).await?;

        if !response.is_token_expired() {
            return Ok(response);
        }

        debug!(endpoint, "Access token expired, attempting refresh");

        if !self.renew_after(observed.as_deref()).await {
            return Ok(response);
        }

        // 重试一次，结果原样返回
        let fresh = if options.include_auth { self.session.access_token() } else { None };
        self.send(&url, options, fresh.as_deref()).await
    }

    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
        bearer: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut builder = self
            .http
            .request(options.method.clone(), url)
            .timeout(self.timeout)
            .headers(Self::build_headers(&options.headers)?);

        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| self.map_transport(e))?;

        debug!(method = %options.method, url, status, "Response received");

        ApiResponse::from_body(&bytes, status)
    }

    /// 默认头加上调用方的额外头，同名时后者覆盖
    fn build_headers(extra: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::Config(format!("invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Config(format!("invalid header value: {}", e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    fn map_transport(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout(self.timeout.as_millis() as u64)
        } else {
            ClientError::Transport(e.to_string())
        }
    }

    /// 在过期响应之后刷新 token
    ///
    /// 拿到锁时若 token 已被其他请求替换，直接复用新 token 而不再次刷新。
    async fn renew_after(&self, observed: Option<&str>) -> bool {
        let _guard = self.refresh_lock.lock().await;

        let current = self.session.access_token();
        if current.is_some() && current.as_deref() != observed {
            debug!("Access token already rotated by a concurrent refresh");
            return true;
        }

        self.refresh_locked().await
    }

    /// 使用 refresh token 换取新的 access token
    pub async fn renew_token(&self) -> bool {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> bool {
        let Some(refresh_token) = self.session.refresh_token() else {
            warn!("No refresh token available, logging out");
            metrics::counter!("api_client_token_refresh_total", "outcome" => "missing").increment(1);
            self.force_logout(LogoutReason::MissingRefreshToken);
            return false;
        };

        match self.post_refresh(&refresh_token).await {
            Ok(RefreshOutcome::Renewed) => {
                info!("Access token renewed");
                metrics::counter!("api_client_token_refresh_total", "outcome" => "renewed")
                    .increment(1);
                true
            }
            Ok(RefreshOutcome::Rejected) => {
                warn!("Refresh token rejected by server, logging out");
                metrics::counter!("api_client_token_refresh_total", "outcome" => "rejected")
                    .increment(1);
                self.force_logout(LogoutReason::RefreshRejected);
                false
            }
            Err(e) => {
                warn!(error = %e, "Token refresh request failed");
                metrics::counter!("api_client_token_refresh_total", "outcome" => "error")
                    .increment(1);
                if self.logout_on_refresh_transport_error {
                    self.force_logout(LogoutReason::RefreshFailed);
                }
                false
            }
        }
    }

    async fn post_refresh(&self, refresh_token: &str) -> Result<RefreshOutcome> {
        let body = serde_json::to_value(RefreshTokenRequest { refresh_token })?;
        let options = RequestOptions::post(body).without_auth();

        let response = self.send(&self.url_for(REFRESH_ENDPOINT), &options, None).await?;

        if !response.success {
            debug!(status = ?response.status, "Refresh endpoint returned failure");
            return Ok(RefreshOutcome::Rejected);
        }

        match response.data_as::<TokenData>() {
            Ok(tokens) => {
                self.session.set_tokens(&tokens.token, tokens.refresh_token.as_deref());
                Ok(RefreshOutcome::Renewed)
            }
            Err(e) => {
                warn!(error = %e, "Refresh response carried no usable token");
                Ok(RefreshOutcome::Rejected)
            }
        }
    }

    /// 主动登出：清除凭据并通知订阅者
    pub fn logout(&self) {
        self.force_logout(LogoutReason::UserRequested);
    }

    fn force_logout(&self, reason: LogoutReason) {
        self.session.clear();
        metrics::counter!("api_client_logout_total").increment(1);
        info!(?reason, "Session cleared");

        // 没有订阅者时发送失败，忽略
        let _ = self.logout_tx.send(LogoutEvent {
            reason,
            at: Utc::now(),
        });
    }

    /// 登录成功后保存 token 与会话标记
    pub(crate) fn store_login(&self, response: &ApiResponse) {
        if !response.success {
            return;
        }

        match response.data_as::<TokenData>() {
            Ok(tokens) => {
                self.session.set_tokens(&tokens.token, tokens.refresh_token.as_deref());
                let marker = tokens.user.unwrap_or_else(|| json!({}));
                self.session.set_session_marker(&marker.to_string());
                info!("Login succeeded, session stored");
            }
            Err(e) => warn!(error = %e, "Login response carried no token"),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("session", &self.session)
            .finish()
    }
}
