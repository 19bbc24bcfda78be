pub mod request {
    use crate::modules::auth::middleware::Auth;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use tempfile::NamedTempFile;

    #[derive(TryFromMultipart)]
    pub struct Body {
        #[form_data(limit = "10MiB")]
        pub files: Vec<FieldData<NamedTempFile>>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::upload::service::{UploadedFile, MAX_FILES_PER_REQUEST};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        FilesUploaded(Vec<UploadedFile>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FilesUploaded(files) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Files uploaded",
                        "files": files,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        NoFilesProvided,
        TooManyFiles,
        FailedToUploadFiles,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::NoFilesProvided => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "No files provided" })),
                )
                    .into_response(),
                Self::TooManyFiles => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!("At most {} files can be uploaded at once", MAX_FILES_PER_REQUEST)
                    })),
                )
                    .into_response(),
                Self::FailedToUploadFiles => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to upload files" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
