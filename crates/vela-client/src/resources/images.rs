//! Image upload (`/api/admin/images/upload`). Multipart; the backend
//! answers with the public URL to store on the product.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::ClientResult;
use crate::http::ApiClient;

const UPLOAD: &str = "/api/admin/images/upload";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

/// Client for the image upload endpoint.
#[derive(Debug, Clone)]
pub struct ImagesApi {
    api: ApiClient,
}

impl ImagesApi {
    pub fn new(api: ApiClient) -> Self {
        ImagesApi { api }
    }

    /// Uploads an image, returning its served URL.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<String> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response: UploadResponse = self.api.post_multipart(UPLOAD, form).await?;
        Ok(response.url)
    }
}
