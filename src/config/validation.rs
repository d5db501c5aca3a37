use crate::config::types::{
    AdmissionConfig, Config, ContentConfig, CrawlConfig, PolitenessConfig, ReportConfig,
    ScopeEntry, UserAgentConfig,
};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_politeness_config(&config.politeness)?;
    validate_content_config(&config.content)?;
    validate_admission_config(&config.admission)?;
    validate_report_config(&config.report)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_crawl_config(&config.crawl)?;
    Ok(())
}

fn validate_politeness_config(config: &PolitenessConfig) -> Result<(), ConfigError> {
    if config.interval_ms == 0 {
        return Err(ConfigError::Validation(
            "interval_ms must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_content_config(config: &ContentConfig) -> Result<(), ConfigError> {
    if config.min_chars == 0 {
        return Err(ConfigError::Validation(
            "min_chars must be greater than 0".to_string(),
        ));
    }

    if config.min_words == 0 {
        return Err(ConfigError::Validation(
            "min_words must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_admission_config(config: &AdmissionConfig) -> Result<(), ConfigError> {
    if config.allowed_schemes.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_schemes cannot be empty".to_string(),
        ));
    }

    for scheme in &config.allowed_schemes {
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "Scheme '{}' must be lowercase ASCII letters",
                scheme
            )));
        }
    }

    for ext in &config.disallowed_extensions {
        if ext.is_empty() || ext.contains('.') || ext.contains('/') {
            return Err(ConfigError::Validation(format!(
                "Extension '{}' must be non-empty and written without dots",
                ext
            )));
        }
    }

    for trap in &config.traps {
        validate_regex(trap)?;
    }

    if config.scope.is_empty() {
        return Err(ConfigError::Validation(
            "At least one scope entry is required".to_string(),
        ));
    }

    for entry in &config.scope {
        match entry {
            ScopeEntry::Domain {
                domain,
                path_prefix,
            } => {
                validate_domain_pattern(domain)?;
                if let Some(prefix) = path_prefix {
                    if !prefix.starts_with('/') {
                        return Err(ConfigError::Validation(format!(
                            "path-prefix '{}' for '{}' must start with '/'",
                            prefix, domain
                        )));
                    }
                }
            }
            ScopeEntry::Pattern { pattern } => validate_regex(pattern)?,
        }
    }

    Ok(())
}

fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.top_words == 0 {
        return Err(ConfigError::Validation(
            "top_words must be at least 1".to_string(),
        ));
    }

    if let Some(path) = &config.summary_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "summary_path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    for seed in &config.seeds {
        let url = Url::parse(seed).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use HTTP or HTTPS",
                seed
            )));
        }
    }

    Ok(())
}

fn validate_regex(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Pattern cannot be empty".to_string(),
        ));
    }

    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    match pattern.strip_prefix("*.") {
        Some(domain) => validate_domain_string(domain),
        None => validate_domain_string(pattern),
    }
}

/// Validates a domain string (without wildcard prefix)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.edu')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| {
        ConfigError::Validation(format!("Invalid email format: '{}'", email))
    })?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_domain_pattern() {
        assert!(validate_domain_pattern("example.edu").is_ok());
        assert!(validate_domain_pattern("*.example.edu").is_ok());
        assert!(validate_domain_pattern("sub.example.edu").is_ok());

        assert!(validate_domain_pattern("").is_err());
        assert!(validate_domain_pattern("*.").is_err());
        assert!(validate_domain_pattern("example").is_err());
        assert!(validate_domain_pattern(".example.edu").is_err());
        assert!(validate_domain_pattern("example.edu.").is_err());
        assert!(validate_domain_pattern("exa mple.edu").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_scope_required() {
        let mut config = Config::default();
        config.admission.scope.clear();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_path_prefix_must_be_absolute() {
        let mut config = Config::default();
        config.admission.scope = vec![ScopeEntry::Domain {
            domain: "example.edu".to_string(),
            path_prefix: Some("docs/".to_string()),
        }];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_scope_regex() {
        let mut config = Config::default();
        config.admission.scope = vec![ScopeEntry::Pattern {
            pattern: "example\\.edu/[".to_string(),
        }];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_schemes_and_extensions() {
        let mut config = Config::default();
        config.admission.allowed_schemes = vec!["HTTP".to_string()];
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.admission.allowed_schemes.clear();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.admission.disallowed_extensions = vec![".pdf".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_thresholds_must_be_positive() {
        let mut config = Config::default();
        config.content.min_words = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.report.top_words = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_seed_must_be_http() {
        let mut config = Config::default();
        config.crawl.seeds = vec!["ftp://www.ics.uci.edu/".to_string()];
        assert!(validate(&config).is_err());

        config.crawl.seeds = vec!["not a url".to_string()];
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.crawl.seeds = vec!["http://www.ics.uci.edu/".to_string()];
        assert!(validate(&config).is_ok());
    }
}
