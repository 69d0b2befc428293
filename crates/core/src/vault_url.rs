//! Vault base URL construction

use vaultdetect_domain::constants::{PRODUCTION_VAULT_DOMAIN, SANDBOX_VAULT_DOMAIN};

/// Normalize a vault identifier or URL into a base URL.
///
/// Values that already carry a scheme are an override for alternate
/// endpoints and are used verbatim minus trailing slashes. Anything else is
/// treated as the vault subdomain.
pub fn normalize_base_url(vault_uri: &str, sandbox: bool) -> String {
    if vault_uri.starts_with("http") {
        return vault_uri.trim_end_matches('/').to_string();
    }

    let domain = if sandbox { SANDBOX_VAULT_DOMAIN } else { PRODUCTION_VAULT_DOMAIN };
    format!("https://{vault_uri}.{domain}")
}
