use anyhow::Result;

/// The whole tool runs on one thread. Git calls and stdin reads are awaited one after another.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
