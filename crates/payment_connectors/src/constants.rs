//! Header names shared by connector integrations.

pub(crate) mod headers {
    pub(crate) const AUTHORIZATION: &str = "Authorization";
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const SQUARE_VERSION: &str = "Square-Version";
}
