use crate::error::CheckersError;

/// Configuration for the match registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of matches the registry will create. 0 = unbounded.
    /// Fetching an existing match is never refused. Default: 10_000.
    pub max_matches: usize,
    /// Maximum match id length in bytes. Default: 128.
    pub max_match_id_len: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_matches: 10_000,
            max_match_id_len: 128,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), CheckersError> {
        if self.max_match_id_len == 0 {
            return Err(CheckersError::InvalidConfig {
                reason: "max_match_id_len must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_match_id(&self, match_id: &str) -> Result<(), CheckersError> {
        if match_id.is_empty() {
            return Err(CheckersError::InvalidMatchId {
                reason: "match id is empty".into(),
            });
        }
        if match_id.len() > self.max_match_id_len {
            return Err(CheckersError::InvalidMatchId {
                reason: format!(
                    "match id is {} bytes, limit is {}",
                    match_id.len(),
                    self.max_match_id_len
                ),
            });
        }
        Ok(())
    }
}
