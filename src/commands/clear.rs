use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::storage::clear_transactions;
use crate::{Config, Result};

/// Removes every stored transaction. The configuration is left untouched.
pub async fn clear(config: Config) -> Result<Out<()>> {
    clear_transactions(&config.storage())
        .await
        .pub_result(ErrorType::Storage)?;
    Ok("Removed all stored transactions".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::load_transactions;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_clear_command() {
        let env = TestEnv::new().await;
        env.seed().await;
        assert_eq!(load_transactions(&env.config().storage()).await.len(), 3);
        clear(env.config()).await.unwrap();
        assert!(load_transactions(&env.config().storage()).await.is_empty());

        // Clearing an empty store is fine.
        clear(env.config()).await.unwrap();
    }
}
