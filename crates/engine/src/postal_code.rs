//! Client for a ViaCEP-compatible postal code service.
//!
//! `GET {base_url}/{cep}/json/` answers either the address or
//! `{"erro": true}` for a well-formed but unknown code.

use std::time::Duration;

use serde::Deserialize;

use crate::{EngineError, ResultEngine, addresses::AddressLookup, validation};

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

#[derive(Clone, Debug)]
pub(crate) struct PostalCodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostalCodeClient {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> ResultEngine<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| EngineError::PostalCode(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve `cep` to an address.
    ///
    /// Returns `Ok(None)` for codes that are malformed or unknown to the
    /// service; transport failures and 5xx answers are errors.
    pub(crate) async fn lookup(&self, cep: &str) -> ResultEngine<Option<AddressLookup>> {
        let Some(digits) = validation::cep_digits(cep) else {
            return Ok(None);
        };

        let url = format!("{}/{digits}/json/", self.base_url);
        let response = self.http.get(&url).send().await.map_err(|err| {
            tracing::warn!("postal code lookup failed: {err}");
            EngineError::PostalCode(err.to_string())
        })?;

        let status = response.status();
        if status.is_client_error() {
            return Ok(None);
        }
        if !status.is_success() {
            tracing::warn!("postal code service answered {status}");
            return Err(EngineError::PostalCode(format!("unexpected status {status}")));
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|err| EngineError::PostalCode(err.to_string()))?;
        if body.erro.is_some() {
            return Ok(None);
        }

        Ok(Some(AddressLookup {
            logradouro: body.logradouro,
            complemento: body.complemento,
            bairro: body.bairro,
            cidade: body.localidade,
            uf: body.uf,
        }))
    }
}
