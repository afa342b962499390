pub mod auth;
pub mod catalog;
pub mod characters;
pub mod fallback;
pub mod health;

/// Run store-bound work (file IO, the store lock, password hashing) on the
/// blocking pool instead of an async worker
pub(crate) async fn run_blocking<T, E, F>(f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<anyhow::Error> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => Err(E::from(anyhow::Error::new(e).context("Blocking task failed"))),
    }
}
