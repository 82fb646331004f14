use std::sync::Arc;

use anyhow::{Context, Result};
use colleges::{
    CollegeSource,
    remote::RemoteDirectory,
    store::{StoreSettings, SupabaseStore},
};
use reqwest::{Client, Url};
use tracing::info;

use super::{config::Config, render::Templates};

pub struct State {
    pub config: Config,
    /// Backs `/api/colleges`.
    pub store: Arc<dyn CollegeSource>,
    /// Backs the HTML page. The store itself unless `DIRECTORY_API_URL` is set.
    pub page_source: Arc<dyn CollegeSource>,
    pub templates: Templates,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let store: Arc<dyn CollegeSource> = Arc::new(SupabaseStore::new(StoreSettings {
            url: config.store_url.clone(),
            anon_key: config.store_key.clone(),
            timeout: config.store_timeout,
        }));

        let page_source = match &config.directory_api {
            Some(api) => {
                let url = Url::parse(api)
                    .with_context(|| format!("Invalid DIRECTORY_API_URL: {api}"))?;
                let client = Client::builder().timeout(config.store_timeout).build()?;
                info!(%url, "Page reads from remote directory");

                Arc::new(RemoteDirectory::new(client, url)) as Arc<dyn CollegeSource>
            }
            None => store.clone(),
        };

        Self::with_sources(config, store, page_source)
    }

    pub fn with_sources(
        config: Config,
        store: Arc<dyn CollegeSource>,
        page_source: Arc<dyn CollegeSource>,
    ) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            config,
            store,
            page_source,
            templates: Templates::new().context("Failed to load templates")?,
        }))
    }
}
