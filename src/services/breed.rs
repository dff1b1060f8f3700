// src/services/breed.rs

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

// Capacidade injetada de validar raças, para os testes não dependerem da rede
#[async_trait]
pub trait BreedValidator: Send + Sync {
    async fn is_known_breed(&self, raca: &str) -> bool;
}

// Padroniza o nome da raça para comparação (a API usa nomes em minúsculas)
pub fn normalize_breed(raca: &str) -> String {
    raca.trim().to_lowercase()
}

// Formato da resposta de https://dog.ceo/api/breeds/list/all:
// as chaves de `message` são as raças, os valores são as sub-raças.
#[derive(Debug, Deserialize)]
struct BreedListResponse {
    message: HashMap<String, Vec<String>>,
}

// Implementação real, consultando a API pública dog.ceo
pub struct DogCeoBreedValidator {
    client: reqwest::Client,
    base_url: String,
}

impl DogCeoBreedValidator {
    pub fn new() -> Self {
        Self::with_base_url("https://dog.ceo/api")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_breeds(&self) -> Result<BreedListResponse, reqwest::Error> {
        let url = format!("{}/breeds/list/all", self.base_url);
        self.client.get(url).send().await?.json().await
    }
}

#[async_trait]
impl BreedValidator for DogCeoBreedValidator {
    // Melhor esforço: falha na consulta conta como "raça desconhecida",
    // nunca vira erro 500.
    async fn is_known_breed(&self, raca: &str) -> bool {
        match self.fetch_breeds().await {
            Ok(response) => response.message.contains_key(&normalize_breed(raca)),
            Err(e) => {
                tracing::warn!("Falha ao consultar a base de raças (dog.ceo): {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    // Stub para os testes: uma lista fixa de raças conhecidas
    pub struct StubBreedValidator {
        pub known: Vec<&'static str>,
    }

    #[async_trait]
    impl BreedValidator for StubBreedValidator {
        async fn is_known_breed(&self, raca: &str) -> bool {
            self.known.contains(&normalize_breed(raca).as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::StubBreedValidator;
    use super::*;

    #[test]
    fn normaliza_caixa_e_espacos() {
        assert_eq!(normalize_breed("  Labrador "), "labrador");
        assert_eq!(normalize_breed("PUG"), "pug");
    }

    #[tokio::test]
    async fn stub_compara_com_nome_normalizado() {
        let validator = StubBreedValidator {
            known: vec!["labrador", "pug"],
        };
        assert!(validator.is_known_breed(" Labrador ").await);
        assert!(!validator.is_known_breed("vira-lata").await);
    }
}
