//! Codex: GitHub `Authorization` header to bearer-token env var

use tracing::debug;

use super::ServerTransform;
use crate::error::Result;
use crate::model::{ServerSet, Value};

/// Env var Codex reads the GitHub token from.
pub const CODEX_TOKEN_ENV_VAR: &str = "CODEX_GITHUB_PERSONAL_ACCESS_TOKEN";

const GITHUB_SERVER: &str = "github";
const TOKEN_KEY: &str = "bearer_token_env_var";
const AUTH_HEADER: &str = "Authorization";

/// Codex transform.
///
/// Only the `github` entry is touched. A literal `Authorization` header is
/// dropped in favour of `bearer_token_env_var`; an existing env var setting is
/// kept as-is. An emptied `headers` map is removed.
#[derive(Debug, Default, Clone)]
pub struct TokenHeaderTransform;

impl ServerTransform for TokenHeaderTransform {
    fn name(&self) -> &'static str {
        "token-header"
    }

    fn transform(&self, servers: &mut ServerSet) -> Result<()> {
        let Some(server) = servers
            .get_mut(GITHUB_SERVER)
            .and_then(Value::as_map_mut)
        else {
            return Ok(());
        };
        let has_env = server.contains_key(TOKEN_KEY);
        let Some(headers) = server.get_mut("headers").and_then(Value::as_map_mut) else {
            return Ok(());
        };

        let had_auth = headers.remove(AUTH_HEADER).is_some();
        if !has_env && !had_auth {
            return Ok(());
        }
        let headers_empty = headers.is_empty();

        if !has_env {
            debug!("replacing github Authorization header with {CODEX_TOKEN_ENV_VAR}");
            server.insert(TOKEN_KEY.to_string(), Value::from(CODEX_TOKEN_ENV_VAR));
        }
        if headers_empty {
            server.remove("headers");
        }
        Ok(())
    }
}
