//! # report
//!
//! Renders the two JSON artifacts into one static HTML dashboard. A missing
//! artifact degrades to zeroed defaults so the dashboard can always be
//! produced, even before `perf`/`cap` have run.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::error::HarnessResult;

pub fn run(config: &BenchConfig) -> HarnessResult<()> {
    let results_dir = Path::new(&config.results_dir);

    let perf = load_or_default(
        &results_dir.join("performance_results.json"),
        json!({
            "postgresql": { "total_avg_ms": 0.0 },
            "mongodb": { "total_avg_ms": 0.0 },
            "queries": [],
        }),
    );
    let cap = load_or_default(
        &results_dir.join("cap_analysis.json"),
        json!({ "postgresql": {}, "mongodb": {}, "analysis": {} }),
    );

    let html = render(&perf, &cap);

    fs::create_dir_all(results_dir)?;
    let path = results_dir.join("dashboard.html");
    fs::write(&path, html)?;
    info!(path = %path.display(), "dashboard written");
    Ok(())
}

/// Reads a JSON artifact, falling back to the given default when the file
/// is absent or unparseable.
fn load_or_default(path: &Path, default: Value) -> Value {
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "artifact unreadable, using defaults");
                default
            }
        },
        Err(_) => {
            warn!(path = %path.display(), "artifact missing, using defaults");
            default
        }
    }
}

fn f64_at(value: &Value, keys: &[&str]) -> f64 {
    let mut current = value;
    for key in keys {
        current = &current[*key];
    }
    current.as_f64().unwrap_or(0.0)
}

fn passed_badge(value: &Value, keys: &[&str]) -> &'static str {
    let mut current = value;
    for key in keys {
        current = &current[*key];
    }
    match current.as_bool() {
        Some(true) => r#"<span class="badge pass">PASSED</span>"#,
        Some(false) => r#"<span class="badge fail">FAILED</span>"#,
        None => r#"<span class="badge none">N/A</span>"#,
    }
}

/// Builds the full dashboard page from the two artifacts.
fn render(perf: &Value, cap: &Value) -> String {
    let pg_total = f64_at(perf, &["postgresql", "total_avg_ms"]);
    let mongo_total = f64_at(perf, &["mongodb", "total_avg_ms"]);

    let mut query_rows = String::new();
    if let Some(queries) = perf["queries"].as_array() {
        for q in queries {
            let name = q["name"].as_str().unwrap_or("?");
            let pg_ms = q["postgresql"].as_f64().unwrap_or(0.0);
            let mongo_ms = q["mongodb"].as_f64().unwrap_or(0.0);
            let winner = if pg_ms <= mongo_ms {
                r#"<span class="badge pg">PostgreSQL</span>"#
            } else {
                r#"<span class="badge mongo">MongoDB</span>"#
            };
            query_rows.push_str(&format!(
                "<tr><td>{name}</td><td>{pg_ms:.3} ms</td><td>{mongo_ms:.3} ms</td><td>{winner}</td></tr>\n"
            ));
        }
    }

    let overall = if pg_total > 0.0 && mongo_total > 0.0 {
        if pg_total < mongo_total {
            format!("PostgreSQL ~{:.1}x faster overall", mongo_total / pg_total)
        } else {
            format!("MongoDB ~{:.1}x faster overall", pg_total / mongo_total)
        }
    } else {
        "run `storebench perf` to populate timings".to_string()
    };

    let pg_tests = &cap["postgresql"]["tests"];
    let mongo_tests = &cap["mongodb"]["tests"];
    let cap_rows = format!(
        concat!(
            "<tr><td>Transaction rollback</td><td>PostgreSQL</td><td>{}</td></tr>\n",
            "<tr><td>Foreign key enforcement</td><td>PostgreSQL</td><td>{}</td></tr>\n",
            "<tr><td>Atomic update</td><td>MongoDB</td><td>{}</td></tr>\n",
            "<tr><td>Acknowledged write</td><td>MongoDB</td><td>{} ({:.3} ms)</td></tr>\n",
            "<tr><td>Availability (avg response)</td><td>PostgreSQL</td><td>{:.3} ms</td></tr>\n",
            "<tr><td>Availability (avg response)</td><td>MongoDB</td><td>{:.3} ms</td></tr>\n",
        ),
        passed_badge(pg_tests, &["transaction_rollback", "passed"]),
        passed_badge(pg_tests, &["foreign_key_constraint", "passed"]),
        passed_badge(mongo_tests, &["atomic_update", "passed"]),
        passed_badge(mongo_tests, &["write_concern", "passed"]),
        f64_at(mongo_tests, &["write_concern", "write_time_ms"]),
        f64_at(pg_tests, &["availability", "avg_response_ms"]),
        f64_at(mongo_tests, &["availability", "avg_response_ms"]),
    );

    let analysis = &cap["analysis"];
    let analysis_rows = format!(
        concat!(
            "<tr><td>Consistency model</td><td>{}</td><td>{}</td></tr>\n",
            "<tr><td>Partition tolerance</td><td>{}</td><td>{}</td></tr>\n",
            "<tr><td>Failover</td><td>{}</td><td>{}</td></tr>\n",
            "<tr><td>Recommendation</td><td>{}</td><td>{}</td></tr>\n",
        ),
        analysis["postgresql"]["consistency_model"].as_str().unwrap_or("-"),
        analysis["mongodb"]["consistency_model"].as_str().unwrap_or("-"),
        analysis["postgresql"]["partition_tolerance"].as_str().unwrap_or("-"),
        analysis["mongodb"]["partition_tolerance"].as_str().unwrap_or("-"),
        analysis["postgresql"]["failover"].as_str().unwrap_or("-"),
        analysis["mongodb"]["failover"].as_str().unwrap_or("-"),
        analysis["postgresql"]["recommendation"].as_str().unwrap_or("-"),
        analysis["mongodb"]["recommendation"].as_str().unwrap_or("-"),
    );

    let generated_at = Utc::now().format("%Y-%m-%d %H:%M UTC");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>StoreBench - PostgreSQL vs MongoDB</title>
<style>
  :root {{ --pg: #336791; --mongo: #4db33d; }}
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: 'Segoe UI', Tahoma, sans-serif; background: #0f0f1a; color: #fff; padding: 2rem; }}
  h1 {{ margin-bottom: 0.25rem; }}
  h2 {{ margin: 2rem 0 0.75rem; color: #4facfe; }}
  .subtitle {{ color: #a0a0a0; margin-bottom: 1.5rem; }}
  .cards {{ display: flex; gap: 1rem; flex-wrap: wrap; }}
  .card {{ background: rgba(255,255,255,0.05); border-radius: 10px; padding: 1.25rem 1.75rem; min-width: 220px; }}
  .card .value {{ font-size: 1.8rem; font-weight: bold; }}
  .card.pg .value {{ color: var(--pg); }}
  .card.mongo .value {{ color: var(--mongo); }}
  table {{ border-collapse: collapse; width: 100%; max-width: 900px; }}
  th, td {{ text-align: left; padding: 0.5rem 0.9rem; border-bottom: 1px solid rgba(255,255,255,0.1); }}
  th {{ color: #a0a0a0; font-weight: 600; }}
  .badge {{ padding: 0.15rem 0.6rem; border-radius: 999px; font-size: 0.8rem; }}
  .badge.pg {{ background: var(--pg); }}
  .badge.mongo {{ background: var(--mongo); }}
  .badge.pass {{ background: #2e7d32; }}
  .badge.fail {{ background: #c62828; }}
  .badge.none {{ background: #555; }}
  footer {{ margin-top: 2.5rem; color: #666; font-size: 0.85rem; }}
</style>
</head>
<body>
<h1>StoreBench</h1>
<p class="subtitle">PostgreSQL vs MongoDB over an identical synthetic e-commerce dataset</p>

<div class="cards">
  <div class="card pg"><div>PostgreSQL total avg</div><div class="value">{pg_total:.3} ms</div></div>
  <div class="card mongo"><div>MongoDB total avg</div><div class="value">{mongo_total:.3} ms</div></div>
  <div class="card"><div>Verdict</div><div class="value" style="font-size:1.1rem">{overall}</div></div>
</div>

<h2>Query Battery</h2>
<table>
  <tr><th>Query</th><th>PostgreSQL</th><th>MongoDB</th><th>Winner</th></tr>
{query_rows}</table>

<h2>Consistency &amp; Availability Probes</h2>
<table>
  <tr><th>Probe</th><th>Store</th><th>Result</th></tr>
{cap_rows}</table>

<h2>Analysis</h2>
<table>
  <tr><th></th><th>PostgreSQL</th><th>MongoDB</th></tr>
{analysis_rows}</table>

<footer>Generated {generated_at} by storebench report</footer>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_perf() -> Value {
        json!({
            "postgresql": { "total_avg_ms": 10.0 },
            "mongodb": { "total_avg_ms": 20.0 },
            "queries": [
                { "name": "Select All", "postgresql": 1.5, "mongodb": 3.0 },
                { "name": "Text Search", "postgresql": 4.0, "mongodb": 2.0 },
            ],
        })
    }

    fn sample_cap() -> Value {
        json!({
            "postgresql": { "tests": {
                "transaction_rollback": { "passed": true },
                "foreign_key_constraint": { "passed": true },
                "availability": { "avg_response_ms": 0.8 },
            }},
            "mongodb": { "tests": {
                "atomic_update": { "passed": true },
                "write_concern": { "passed": true, "write_time_ms": 1.2 },
                "availability": { "avg_response_ms": 1.4 },
            }},
            "analysis": {
                "postgresql": { "consistency_model": "Strong (ACID)" },
                "mongodb": { "consistency_model": "Tunable" },
            },
        })
    }

    #[test]
    fn test_render_embeds_queries_and_winners() {
        let html = render(&sample_perf(), &sample_cap());
        assert!(html.contains("Select All"));
        assert!(html.contains("1.500 ms"));
        // faster store per row wins the badge
        assert!(html.contains(r#"<td>Select All</td><td>1.500 ms</td><td>3.000 ms</td><td><span class="badge pg">PostgreSQL</span>"#));
        assert!(html.contains("PostgreSQL ~2.0x faster overall"));
    }

    #[test]
    fn test_render_embeds_probe_outcomes() {
        let html = render(&sample_perf(), &sample_cap());
        assert!(html.contains("Transaction rollback"));
        assert!(html.contains("PASSED"));
        assert!(html.contains("Strong (ACID)"));
    }

    #[test]
    fn test_render_with_empty_defaults() {
        let perf = json!({
            "postgresql": { "total_avg_ms": 0.0 },
            "mongodb": { "total_avg_ms": 0.0 },
            "queries": [],
        });
        let cap = json!({ "postgresql": {}, "mongodb": {}, "analysis": {} });
        let html = render(&perf, &cap);
        assert!(html.contains("run `storebench perf`"));
        assert!(html.contains("N/A"));
    }
}
