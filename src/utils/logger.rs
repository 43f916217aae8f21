use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Filter used when `RUST_LOG` is unset. Quiet by default so that only
/// warnings reach stderr next to `show`/`header` output.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "scalene_config=debug,info"
    } else {
        "scalene_config=warn"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Logs go to stderr so that stdout carries
/// only the command's own output.
pub fn init_logger(verbose: bool, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "scalene_config=warn");
        assert!(default_directives(true).starts_with("scalene_config=debug"));
    }

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            assert!(default_directives(verbose).parse::<EnvFilter>().is_ok());
        }
    }
}
