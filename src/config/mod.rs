pub mod application;
#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

/// Replaces `${VAR_NAME}` with the variable's value; unset variables are left as written.
pub(crate) fn substitute_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}
