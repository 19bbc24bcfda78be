use crate::types::StorageContext;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

#[derive(Debug, PartialEq)]
pub enum Error {
    UploadFailed,
    ResourceNotFound,
    UnexpectedError,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    resource_type: String,
}

#[derive(Serialize, Clone, Debug, Deserialize)]
pub struct UploadedMedia {
    pub public_id: String,
    pub url: String,
    pub resource_type: String,
}

/// Signs request parameters the way the storage API expects: sorted
/// `key=value` pairs joined with `&`, suffixed with the api secret and hex
/// encoded.
pub fn sign_params<D: Digest>(params: &[(&str, String)], api_secret: &str) -> String {
    let mut params = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .collect::<Vec<_>>();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let data_to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = D::new();
    hasher.update(format!("{}{}", data_to_sign, api_secret));
    base16ct::lower::encode_string(&hasher.finalize())
}

pub async fn upload_file(
    cfg: StorageContext,
    file_name: String,
    contents: Vec<u8>,
) -> Result<UploadedMedia, Error> {
    let part = Part::bytes(contents).file_name(file_name.clone());

    let timestamp = chrono::Utc::now().timestamp().to_string();
    let signature = sign_params::<Sha256>(
        &[
            ("folder", cfg.folder.clone()),
            ("timestamp", timestamp.clone()),
            ("unique_filename", "true".to_string()),
            ("use_filename", "true".to_string()),
        ],
        &cfg.api_secret,
    );

    let form = Form::new()
        .text("folder", cfg.folder.clone())
        .text("api_key", cfg.api_key.clone())
        .text("timestamp", timestamp)
        .text("use_filename", "true")
        .text("unique_filename", "true")
        .text("signature", signature)
        .text("signature_algorithm", "sha256")
        .part("file", part);

    let res = Client::new()
        .post(format!(
            "{}/{}/auto/upload",
            cfg.api_endpoint, cfg.cloud_name
        ))
        .multipart(form)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while trying to upload {}: {:?}", file_name, err);
            Error::UploadFailed
        })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Error occurred while processing return data: {:?}", err);
        Error::UploadFailed
    })?;

    if status != StatusCode::OK {
        tracing::error!("Failed to upload file: {}", data);
        return Err(Error::UploadFailed);
    }

    match serde_json::de::from_str::<UploadResponse>(data.as_ref()) {
        Ok(res) => Ok(UploadedMedia {
            url: res.secure_url,
            public_id: res.public_id,
            resource_type: res.resource_type,
        }),
        Err(err) => {
            tracing::error!("Failed to deserialize storage response: {:?}", err);
            Err(Error::UploadFailed)
        }
    }
}

pub async fn ensure_resource_exists(
    cfg: StorageContext,
    public_id: String,
    resource_type: String,
) -> Result<(), Error> {
    let res = Client::new()
        .get(format!(
            "{}/{}/resources/{}/upload/{}",
            cfg.api_endpoint, cfg.cloud_name, resource_type, public_id
        ))
        .basic_auth(cfg.api_key.clone(), Some(cfg.api_secret.clone()))
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to look up resource {}: {:?}", public_id, err);
            Error::UnexpectedError
        })?;

    match res.status() {
        StatusCode::OK => Ok(()),
        StatusCode::NOT_FOUND => {
            tracing::warn!("Resource {} ({}) not found", public_id, resource_type);
            Err(Error::ResourceNotFound)
        }
        status => {
            let data = res.text().await.unwrap_or_default();
            tracing::error!("Unexpected {} while looking up {}: {}", status, public_id, data);
            Err(Error::UnexpectedError)
        }
    }
}

pub fn private_download_url(
    cfg: &StorageContext,
    public_id: &str,
    resource_type: &str,
    timestamp: i64,
) -> String {
    let timestamp = timestamp.to_string();
    let signature = sign_params::<Sha1>(
        &[
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp.clone()),
            ("type", "upload".to_string()),
        ],
        &cfg.api_secret,
    );

    format!(
        "{}/{}/{}/download?api_key={}&public_id={}&signature={}&timestamp={}&type=upload",
        cfg.api_endpoint,
        cfg.cloud_name,
        resource_type,
        urlencoding::encode(&cfg.api_key),
        urlencoding::encode(public_id),
        signature,
        timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> StorageContext {
        StorageContext {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            api_endpoint: "https://api.cloudinary.com/v1_1".to_string(),
            folder: "ficago".to_string(),
        }
    }

    #[test]
    fn signature_ignores_parameter_order_and_empty_values() {
        let a = sign_params::<Sha1>(
            &[
                ("timestamp", "1".to_string()),
                ("public_id", "doc".to_string()),
                ("format", "".to_string()),
            ],
            "secret",
        );
        let b = sign_params::<Sha1>(
            &[("public_id", "doc".to_string()), ("timestamp", "1".to_string())],
            "secret",
        );

        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }

    #[test]
    fn signature_matches_manual_digest() {
        let mut hasher = Sha256::new();
        hasher.update("folder=ficago&timestamp=10secret");
        let expected = base16ct::lower::encode_string(&hasher.finalize());

        assert_eq!(
            sign_params::<Sha256>(
                &[("timestamp", "10".to_string()), ("folder", "ficago".to_string())],
                "secret"
            ),
            expected
        );
    }

    #[test]
    fn download_url_targets_the_resource_type() {
        let url = private_download_url(&storage(), "ficago/contract", "raw", 1700000000);

        assert!(url.starts_with("https://api.cloudinary.com/v1_1/demo/raw/download?"));
        assert!(url.contains("public_id=ficago%2Fcontract"));
        assert!(url.contains("timestamp=1700000000"));
    }
}
