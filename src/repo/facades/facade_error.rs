#[derive(thiserror::Error, Debug)]
pub enum FacadeError {
    #[error("configuration error :: {0}")]
    ConfigError(#[from] crate::config::Error),
    #[error("dataset error :: {0}")]
    DatasetError(#[from] crate::types::Error),
    #[error("filter error :: {0}")]
    FilterError(#[from] crate::query::Error),
    #[error("repository error :: {0}")]
    RepositoryError(#[from] crate::repo::Error),
}
