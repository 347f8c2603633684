//! Caption listing use case.

use std::sync::Arc;

use caprate_domain::Caption;

use crate::infrastructure::ports::{CaptionRepo, RepoError};

/// Fetch the full caption set, the one read the client does per session.
pub struct ListCaptions {
    captions: Arc<dyn CaptionRepo>,
}

impl ListCaptions {
    pub fn new(captions: Arc<dyn CaptionRepo>) -> Self {
        Self { captions }
    }

    pub async fn execute(&self, access_token: Option<String>) -> Result<Vec<Caption>, RepoError> {
        let rows = self.captions.list_all(access_token).await?;
        tracing::debug!(count = rows.len(), "fetched captions");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::ports::MockCaptionRepo;

    use super::*;

    #[tokio::test]
    async fn passes_the_caller_token_through() {
        let mut repo = MockCaptionRepo::new();
        repo.expect_list_all()
            .withf(|token| token.as_deref() == Some("tok"))
            .returning(|_| Ok(vec![Caption::new("c1", "hello")]));

        let use_case = ListCaptions::new(Arc::new(repo));
        let rows = use_case
            .execute(Some("tok".to_string()))
            .await
            .expect("list succeeds");
        assert_eq!(rows.len(), 1);
    }
}
