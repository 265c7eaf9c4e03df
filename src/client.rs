//! Client core: request construction, authentication, and the transport
//! executor shared by every resource service.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use tokio::sync::Mutex;

use crate::account::AccountService;
use crate::captions::CaptionsService;
use crate::chapters::ChaptersService;
use crate::credentials::{Credential, TokenResponse};
use crate::error::Error;
use crate::livestreams::LivestreamsService;
use crate::players::PlayersService;
use crate::statistics::StatisticsService;
use crate::upload::DEFAULT_CHUNK_SIZE;
use crate::upload_tokens::UploadTokensService;
use crate::videos::VideosService;

const PRODUCTION_BASE_URL: &str = "https://ws.api.video/";
const SANDBOX_BASE_URL: &str = "https://sandbox.api.video/";

/// Which api.video host a [`Client`] talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// `https://ws.api.video/`
    #[default]
    Production,
    /// `https://sandbox.api.video/`
    Sandbox,
}

impl Environment {
    fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

/// Client for the api.video HTTP API.
///
/// One client owns one bearer credential, lazily obtained by exchanging the
/// configured API key and transparently renewed once it expires. The
/// credential lives behind an async mutex so concurrent calls sharing a
/// client never issue duplicate exchanges. Cloning a client is cheap and the
/// clones share that credential.
///
/// Resource operations hang off the service accessors ([`Client::videos`],
/// [`Client::livestreams`], ...); the client itself only knows how to build,
/// authenticate, and execute requests.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    credential: Arc<Mutex<Option<Credential>>>,
    chunk_size: u64,
}

/// Configures and builds a [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    api_key: String,
    environment: Environment,
    base_url: Option<String>,
    chunk_size: u64,
}

impl ClientBuilder {
    /// Selects the production or sandbox host.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the base URL entirely, e.g. for a self-hosted gateway or a
    /// mock server in tests. Takes precedence over [`Self::environment`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the upload chunk size in bytes (default 128 MiB).
    ///
    /// Files larger than this are uploaded as sequential `Content-Range`
    /// requests. A size of `0` disables chunking: the whole file is sent as
    /// one request with no range header.
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let mut base_url = self
            .base_url
            .unwrap_or_else(|| self.environment.base_url().to_owned());
        // Url::join treats the base as a directory only with the slash.
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .map_err(|e| Error::InvalidRequest(format!("invalid base url {base_url:?}: {e}")))?;

        Ok(Client {
            http: reqwest::Client::new(),
            base_url,
            api_key: self.api_key,
            credential: Arc::new(Mutex::new(None)),
            chunk_size: self.chunk_size,
        })
    }
}

/// Wire shape of an api.video error body.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    error_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
}

impl Client {
    /// Creates a production client for the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    /// Creates a sandbox client for the given API key.
    pub fn sandbox(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::builder(api_key)
            .environment(Environment::Sandbox)
            .build()
    }

    /// Starts building a client with non-default configuration.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            api_key: api_key.into(),
            environment: Environment::default(),
            base_url: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Operations on videos.
    pub fn videos(&self) -> VideosService<'_> {
        VideosService { client: self }
    }

    /// Operations on livestreams.
    pub fn livestreams(&self) -> LivestreamsService<'_> {
        LivestreamsService { client: self }
    }

    /// Operations on video captions.
    pub fn captions(&self) -> CaptionsService<'_> {
        CaptionsService { client: self }
    }

    /// Operations on video chapters.
    pub fn chapters(&self) -> ChaptersService<'_> {
        ChaptersService { client: self }
    }

    /// Operations on players.
    pub fn players(&self) -> PlayersService<'_> {
        PlayersService { client: self }
    }

    /// Analytics queries.
    pub fn statistics(&self) -> StatisticsService<'_> {
        StatisticsService { client: self }
    }

    /// The account endpoint.
    pub fn account(&self) -> AccountService<'_> {
        AccountService { client: self }
    }

    /// Delegated-upload token generation.
    pub fn upload_tokens(&self) -> UploadTokensService<'_> {
        UploadTokensService { client: self }
    }

    pub(crate) fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Returns a fresh access token, exchanging the API key if the cached
    /// credential is missing or expired.
    ///
    /// This is the only path by which requests get authenticated. The
    /// exchange happens inside the credential lock, so concurrent callers
    /// waiting on an expired token trigger exactly one exchange.
    async fn bearer_token(&self) -> Result<String, Error> {
        let mut credential = self.credential.lock().await;

        if let Some(current) = credential.as_ref() {
            if current.is_fresh() {
                return Ok(current.access_token().to_owned());
            }
            tracing::debug!("access token expired, exchanging API key for a new one");
        }

        let fresh = self.exchange_api_key().await?;
        let token = fresh.access_token().to_owned();
        *credential = Some(fresh);
        Ok(token)
    }

    /// Exchanges the long-lived API key for a short-lived bearer credential
    /// via `POST /auth/api-key`.
    async fn exchange_api_key(&self) -> Result<Credential, Error> {
        let url = self
            .base_url
            .join("auth/api-key")
            .map_err(|e| Error::InvalidRequest(format!("invalid auth endpoint: {e}")))?;

        let response = self
            .http
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .json(&serde_json::json!({ "apiKey": self.api_key }))
            .send()
            .await
            .map_err(|e| Error::Auth(Box::new(Error::Network(e))))?;

        let status = response.status();
        if !status.is_success() {
            let failure = Self::classify_failure(status, Method::POST, url, response).await;
            return Err(Error::Auth(Box::new(failure)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Auth(Box::new(Error::Network(e))))?;
        let token: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::Auth(Box::new(Error::Decode(e))))?;

        tracing::debug!(expires_in = token.expires_in, "obtained fresh access token");
        Ok(Credential::from_response(token))
    }

    /// Builds an authenticated request for `path` relative to the base URL,
    /// with `Accept: application/json` set.
    ///
    /// No network call happens here beyond a possible token exchange; the
    /// caller attaches a body and hands the builder to [`Self::execute`].
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, Error> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::InvalidRequest(format!("invalid request path {path:?}: {e}")))?;
        let token = self.bearer_token().await?;

        Ok(self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .bearer_auth(token))
    }

    /// Sends a prepared request and decodes the JSON response body.
    ///
    /// Exactly one round trip. Non-2xx statuses become [`Error::Api`] with
    /// the body classified by [`Self::classify_failure`]; a 2xx body that
    /// does not match `T` becomes [`Error::Decode`].
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::trace!(%method, %url, "dispatching request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(status, method, url, response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }

    /// Sends a prepared request and discards the response body.
    ///
    /// Used for DELETE-style calls; the body is still fully read so the
    /// connection can be reused.
    pub(crate) async fn execute_discard(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), Error> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::trace!(%method, %url, "dispatching request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::classify_failure(status, method, url, response).await);
        }

        response.bytes().await?;
        Ok(())
    }

    /// Turns a non-2xx response into an immutable [`Error::Api`].
    ///
    /// Tries the documented `{"type","title","name"}` error shape first; a
    /// non-empty body that is not that shape is carried verbatim as the
    /// title. No live handle to the response survives in the error.
    async fn classify_failure(
        status: StatusCode,
        method: Method,
        url: Url,
        response: Response,
    ) -> Error {
        let body = response.text().await.unwrap_or_default();

        let (mut error_type, mut title, mut name) = (None, None, None);
        if !body.is_empty() {
            match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(detail) => {
                    error_type = detail.error_type;
                    title = detail.title;
                    name = detail.name;
                }
                Err(_) => title = Some(body),
            }
        }

        Error::Api {
            status: status.as_u16(),
            method,
            url: url.to_string(),
            error_type,
            title,
            name,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let request = self.request(Method::GET, path).await?;
        self.execute(request).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, Error> {
        let request = self.request(Method::GET, path).await?.query(query);
        self.execute(request).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let request = self.request(Method::POST, path).await?.json(body);
        self.execute(request).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let request = self
            .request(Method::POST, path)
            .await?
            .header(CONTENT_TYPE, "application/json");
        self.execute(request).await
    }

    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let request = self.request(Method::PATCH, path).await?.json(body);
        self.execute(request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let request = self.request(Method::DELETE, path).await?;
        self.execute_discard(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environments_map_to_fixed_hosts() {
        assert_eq!(Environment::Production.base_url(), "https://ws.api.video/");
        assert_eq!(Environment::Sandbox.base_url(), "https://sandbox.api.video/");
    }

    #[test]
    fn builder_normalizes_base_url_to_directory() {
        let client = Client::builder("key")
            .base_url("http://127.0.0.1:3999")
            .build()
            .unwrap();
        assert_eq!(client.base_url.as_str(), "http://127.0.0.1:3999/");
    }

    #[test]
    fn builder_rejects_malformed_base_url() {
        let err = Client::builder("key").base_url("not a url").build();
        assert!(matches!(err, Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn error_body_classification_falls_back_to_raw_text() {
        let detail: Result<ApiErrorBody, _> = serde_json::from_str("internal error");
        assert!(detail.is_err());

        let detail: ApiErrorBody = serde_json::from_str(
            r#"{"type":"https://docs.api.video/problems/not-found","title":"not found","name":"VideoNotFoundError"}"#,
        )
        .unwrap();
        assert_eq!(detail.title.as_deref(), Some("not found"));
        assert_eq!(detail.name.as_deref(), Some("VideoNotFoundError"));
    }
}
