use std::io::Write;

use anyhow::{Result, bail};

use mailprobe_lib::check::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Ndjson,
}

pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "human" => Ok(OutputFormat::Human),
        "ndjson" => Ok(OutputFormat::Ndjson),
        other => bail!("unknown --format '{other}', use: human|ndjson"),
    }
}

pub fn write_result(
    out: &mut impl Write,
    result: &ValidationResult,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => writeln!(out, "{}", render_line(result))?,
        OutputFormat::Ndjson => {
            #[cfg(feature = "with-serde")]
            writeln!(out, "{}", serde_json::to_string(result)?)?;
            #[cfg(not(feature = "with-serde"))]
            {
                let _ = result;
                bail!("--format ndjson requires the 'with-serde' feature");
            }
        }
    }
    // One line at a time, flushed: downstream pipelines read as we go.
    out.flush()?;
    Ok(())
}

/// One stable tab-separated line per address.
pub fn render_line(result: &ValidationResult) -> String {
    let mut preview = result
        .mx_hosts
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",");
    if result.mx_hosts.len() > 3 {
        preview.push_str(",...");
    }
    format!(
        "{}\t{}\tmx=[{}]\tsmtp={}",
        result.address, result.domain_status, preview, result.smtp_status
    )
}

#[cfg(test)]
mod tests {
    use mailprobe_lib::check::{DomainStatus, SmtpStatus};

    use super::*;

    fn result(mx_hosts: Vec<&str>) -> ValidationResult {
        ValidationResult {
            address: "user@example.com".to_string(),
            domain: "example.com".to_string(),
            mx_hosts: mx_hosts.into_iter().map(str::to_string).collect(),
            domain_status: DomainStatus::ValidDomain,
            smtp_status: SmtpStatus::Accepted,
        }
    }

    #[test]
    fn renders_valid_domain_line() {
        let line = render_line(&result(vec!["mx1.example.com", "mx2.example.com"]));
        assert_eq!(
            line,
            "user@example.com\tдомен валиден\tmx=[mx1.example.com,mx2.example.com]\tsmtp=accepted"
        );
    }

    #[test]
    fn previews_at_most_three_exchangers() {
        let line = render_line(&result(vec!["mx1", "mx2", "mx3", "mx4"]));
        assert!(line.contains("mx=[mx1,mx2,mx3,...]"));
    }

    #[test]
    fn renders_parse_failure_line() {
        let failed = ValidationResult {
            address: "no-domain-here".to_string(),
            domain: String::new(),
            mx_hosts: Vec::new(),
            domain_status: DomainStatus::NoDomain,
            smtp_status: SmtpStatus::Unknown,
        };
        assert_eq!(
            render_line(&failed),
            "no-domain-here\tдомен отсутствует\tmx=[]\tsmtp=unknown"
        );
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(parse_format("csv").is_err());
    }
}
