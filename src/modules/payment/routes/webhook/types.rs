pub mod request {
    use axum::http::header::{HeaderName, HeaderValue};
    use headers::{Error, Header};
    use std::iter;

    pub static VERIF_HASH: HeaderName = HeaderName::from_static("verif-hash");

    #[derive(Clone, Debug)]
    pub struct VerifHash(pub String);

    impl Header for VerifHash {
        fn name() -> &'static HeaderName {
            &VERIF_HASH
        }

        fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
        where
            Self: Sized,
            I: Iterator<Item = &'i HeaderValue>,
        {
            values
                .next()
                .and_then(|value| value.to_str().ok())
                .map(|value| Self(value.to_string()))
                .ok_or(Error::invalid())
        }

        fn encode<E>(&self, values: &mut E)
        where
            E: Extend<HeaderValue>,
        {
            if let Ok(value) = HeaderValue::from_str(&self.0) {
                values.extend(iter::once(value));
            }
        }
    }
}
