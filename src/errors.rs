use thiserror::Error;

#[derive(Error, Debug)]
pub enum RibbonError {
    #[error("ERR_DASH_PATTERN: {0}")]
    DashPattern(String),
}
