pub mod request {
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;

    #[derive(TryFromMultipart)]
    pub struct Payload {
        #[form_data(limit = "10MiB")]
        pub file: FieldData<NamedTempFile>,
    }
}

pub mod response {
    use crate::modules::upload::service::UploadedFile;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        FileUploaded(UploadedFile),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FileUploaded(file) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "File uploaded",
                        "url": file.url,
                        "file": {
                            "url": file.url,
                            "public_id": file.public_id,
                            "original_name": file.original_name,
                            "size": file.size,
                        }
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToUploadFile,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToUploadFile => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to upload file" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
