use anyhow::Result;

use crate::Dataset;

/// A backing store a dataset snapshot can be loaded from.
///
/// The query layer never sees this trait; it operates on the loaded
/// [`Dataset`] only, so the backing technology stays swappable.
#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self) -> Result<Dataset>;
}
