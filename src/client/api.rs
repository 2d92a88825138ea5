use crate::components::event_store::{Event, NewEvent};
use crate::error::{config_error, AppResult, Error};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Network calls the calendar client makes against the event service
#[async_trait]
pub trait EventApi: Send + Sync {
    async fn list_events(&self) -> AppResult<Vec<Event>>;

    /// Returns the id assigned by the service
    async fn create_event(&self, event: &NewEvent) -> AppResult<i64>;

    async fn update_event(&self, event: &Event) -> AppResult<()>;

    async fn delete_event(&self, id: i64) -> AppResult<()>;
}

#[derive(Debug, Deserialize)]
struct DataBody<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`EventApi`] over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpEventApi {
    client: Client,
    endpoint: Url,
}

impl HttpEventApi {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: &str) -> AppResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> AppResult<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| config_error(&format!("Invalid service URL {}: {}", base_url, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = base
            .join("event")
            .map_err(|e| config_error(&format!("Invalid service URL {}: {}", base_url, e)))?;

        Ok(Self { client, endpoint })
    }

    /// Collection URL, `<base>/event`
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn event_url(&self, id: i64) -> AppResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| config_error("Service URL cannot carry a path"))?
            .push(&id.to_string());
        Ok(url)
    }
}

/// Turn a non-2xx response into `Error::Api` carrying the service message
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl EventApi for HttpEventApi {
    async fn list_events(&self) -> AppResult<Vec<Event>> {
        let response = self.client.get(self.endpoint.clone()).send().await?;
        let body: DataBody<Vec<Event>> = check_status(response).await?.json().await?;
        debug!("Fetched {} events", body.data.len());
        Ok(body.data)
    }

    async fn create_event(&self, event: &NewEvent) -> AppResult<i64> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(event)
            .send()
            .await?;
        let body: DataBody<i64> = check_status(response).await?.json().await?;
        Ok(body.data)
    }

    async fn update_event(&self, event: &Event) -> AppResult<()> {
        let response = self
            .client
            .put(self.event_url(event.id)?)
            .json(event)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> AppResult<()> {
        let response = self.client.delete(self.event_url(id)?).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
