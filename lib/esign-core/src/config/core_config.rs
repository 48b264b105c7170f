use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
#[cfg(any(feature = "config_yaml", feature = "config_json"))]
use figment::providers::{Data, Format};
use secrecy::SecretString;
use serde::Deserialize;

use super::ConfigParsingError;
use crate::provider::xml_signer::CertificateParams;
use crate::provider::{transport, trust_store};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureConfig {
    #[serde(default = "default_generator_name")]
    pub generator_name: String,
    #[serde(default = "default_generator_email")]
    pub generator_email: String,
    /// Forwarded to the provider inside the request meta
    #[serde(default = "default_retry_protocol")]
    pub retry_protocol: u32,
    #[serde(default)]
    pub synchronous: bool,
    /// Signing certificate handed to the [`XmlSignerFactory`](crate::provider::xml_signer::XmlSignerFactory)
    #[serde(default)]
    pub cert_path: Option<PathBuf>,
    #[serde(default = "default_secret")]
    pub cert_pin: SecretString,
    #[serde(default = "default_cancel_reason")]
    pub cancel_reason: String,
    #[serde(default)]
    pub trust_store: trust_store::Params,
    pub transport: transport::Params,
}

fn default_generator_name() -> String {
    "SOON".to_owned()
}

fn default_generator_email() -> String {
    "info@soon.es".to_owned()
}

fn default_retry_protocol() -> u32 {
    3
}

fn default_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_cancel_reason() -> String {
    "Cancelled by requester".to_owned()
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    #[cfg(feature = "config_yaml")]
    pub fn yaml_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Yaml(Yaml::file(p))
    }

    #[cfg(feature = "config_yaml")]
    pub fn yaml_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Yaml(Yaml::string(s.as_ref()))
    }

    #[cfg(feature = "config_json")]
    pub fn json_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Json(Json::file(p))
    }

    #[cfg(feature = "config_json")]
    pub fn json_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Json(Json::string(s.as_ref()))
    }
}

impl SignatureConfig {
    pub fn certificate(&self) -> CertificateParams {
        CertificateParams {
            path: self.cert_path.clone(),
            pin: self.cert_pin.clone(),
        }
    }

    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let inputs = files
            .iter()
            .map(|path| input_for_file(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        Self::parse(configs.into_iter().map(InputFormat::yaml_str))
    }

    /// Merges `inputs` in order, later sources override earlier ones.
    ///
    /// With the `config_env` feature, `ESIGN_` prefixed variables are applied
    /// last (`ESIGN_trustStore__resource` sets `trustStore.resource`).
    pub fn parse(inputs: impl IntoIterator<Item = InputFormat>) -> Result<Self, ConfigParsingError> {
        #[cfg(any(feature = "config_yaml", feature = "config_json"))]
        let figment = inputs
            .into_iter()
            .fold(Figment::new(), |figment, data| match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            });
        #[cfg(not(any(feature = "config_yaml", feature = "config_json")))]
        let figment = {
            drop(inputs);
            Figment::new()
        };

        #[cfg(feature = "config_env")]
        let figment = figment.merge(Env::prefixed("ESIGN_").split("__").lowercase(false));

        figment
            .extract::<SignatureConfig>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))
    }
}

fn input_for_file(path: &Path) -> Result<InputFormat, ConfigParsingError> {
    #[cfg(feature = "config_yaml")]
    if path
        .extension()
        .is_some_and(|ext| ext == "yml" || ext == "yaml")
    {
        return Ok(InputFormat::yaml_file(path));
    }

    #[cfg(feature = "config_json")]
    if path.extension().is_some_and(|ext| ext == "json") {
        return Ok(InputFormat::json_file(path));
    }

    Err(ConfigParsingError::GeneralParsingError(format!(
        "Unsupported file or missing file extension: {:?}",
        path.to_str()
    )))
}
