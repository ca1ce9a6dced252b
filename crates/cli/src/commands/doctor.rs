use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use fabquote_core::config::{AppConfig, LoadOptions};
use fabquote_core::pricing::rates::RateBook;
use fabquote_core::{compose_quote, line_items_for, QuoteCategory, QuoteRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_upstream_endpoint(
                "upstream_pricing",
                config.upstream.pricing_base_url.as_deref(),
            ));
            checks.push(check_upstream_endpoint(
                "upstream_quote_service",
                config.upstream.quote_service_url.as_deref(),
            ));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
        }
    }

    checks.push(check_pricing_tables());

    let overall_status = if checks.iter().any(|check| check.status == CheckStatus::Fail) {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    };
    let summary = match overall_status {
        CheckStatus::Pass => "all checks passed".to_string(),
        _ => "one or more checks failed".to_string(),
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_upstream_endpoint(name: &'static str, url: Option<&str>) -> DoctorCheck {
    match url {
        Some(url) => DoctorCheck {
            name,
            status: CheckStatus::Pass,
            details: format!("configured: {url}"),
        },
        None => DoctorCheck {
            name,
            status: CheckStatus::Skipped,
            details: "not configured; built-in fallback will be used".to_string(),
        },
    }
}

/// Deterministic self-check of the built-in rate tables against a known
/// worked example: 45 sqft of countertop with a bullnose edge, one sink
/// cutout, and 12 lf of backsplash prices to 4775.00 + 405.88 tax.
fn check_pricing_tables() -> DoctorCheck {
    let request = QuoteRequest {
        category: Some(QuoteCategory::Countertop),
        material: Some("granite".to_string()),
        sqft: Some(Decimal::from(45)),
        edge_profile: Some("bullnose".to_string()),
        sink_cutouts: Some(1),
        backsplash_lf: Some(Decimal::from(12)),
        ..QuoteRequest::default()
    };

    let items = line_items_for(&request, &RateBook::fallback());
    let quote = compose_quote(QuoteCategory::Countertop, items, Utc::now());

    let expected_subtotal = Decimal::from(4775);
    let expected_total = Decimal::new(518088, 2);

    if quote.subtotal == expected_subtotal && quote.total == expected_total {
        DoctorCheck {
            name: "pricing_tables",
            status: CheckStatus::Pass,
            details: "fallback pricing reproduces the reference estimate".to_string(),
        }
    } else {
        DoctorCheck {
            name: "pricing_tables",
            status: CheckStatus::Fail,
            details: format!(
                "reference estimate drifted: subtotal {} (want {}), total {} (want {})",
                quote.subtotal, expected_subtotal, quote.total, expected_total
            ),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![format!("doctor: {}", report.summary)];
    for check in &report.checks {
        let status = match check.status {
            CheckStatus::Pass => "pass",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("  [{status}] {:<24} {}", check.name, check.details));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{check_pricing_tables, CheckStatus};

    #[test]
    fn pricing_self_check_passes_against_builtin_tables() {
        let check = check_pricing_tables();
        assert_eq!(check.status, CheckStatus::Pass);
    }
}
