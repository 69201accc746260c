use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::{Error, Res, config, management::Session};

const API_VERSION: &str = "2";

/// Authenticated HTTP access to the trakt API.
///
/// Each call sends one request and consumes the whole response before
/// returning. Nothing is retried or cached.
pub struct TraktClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl TraktClient {
    pub fn new(session: Session) -> Res<Self> {
        Self::with_base_url(session, config::api_url())
    }

    pub fn with_base_url(session: Session, base_url: impl Into<String>) -> Res<Self> {
        let http = Client::builder().user_agent(config::user_agent()).build()?;
        Ok(TraktClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn username(&self) -> &str {
        &self.session.username
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        self.http
            .request(method, url)
            .bearer_auth(&self.session.access_token)
            .header("trakt-api-version", API_VERSION)
            .header("trakt-api-key", &self.session.client_id)
            .header("Accept", "application/json")
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Res<T> {
        debug!(path, ?query, "GET");
        let request = self.request(Method::GET, path).query(query);
        self.send(request, path).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Res<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let request = self.request(Method::POST, path).json(body);
        self.send(request, path).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Res<T> {
        let response = request.send().await?;
        let status = response.status();
        trace!(path, %status, "response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, path, body));
        }

        Ok(response.json::<T>().await?)
    }
}
