use std::process::Command;

use anyhow::{Context, Result};

/// `(no_default_features, features)` pairs checked for `meetgrid-infra`.
const FEATURE_COMBINATIONS: &[(bool, &[&str])] = &[
    (false, &[]), // default (memory-repo)
    (false, &["json-logs"]),
    (true, &[]),
    (true, &["json-logs"]),
];

/// Check that all required feature combinations compile successfully.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} meetgrid-infra feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, (no_default, features)) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let display_label = match (no_default, joined.is_empty()) {
            (false, true) => "default".to_string(),
            (false, false) => format!("default,{joined}"),
            (true, true) => "none".to_string(),
            (true, false) => joined.clone(),
        };

        let mut command = Command::new("cargo");
        command.arg("check").arg("-p").arg("meetgrid-infra").arg("--all-targets");
        if *no_default {
            command.arg("--no-default-features");
        }
        if !joined.is_empty() {
            command.arg("--features").arg(joined.as_str());
        }

        println!(
            "\n[{}/{}] cargo check -p meetgrid-infra ({display_label})",
            index + 1,
            FEATURE_COMBINATIONS.len()
        );

        let status = command
            .status()
            .with_context(|| format!("Failed to run cargo check for '{display_label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{display_label}' failed to compile");
        }

        println!("✅ Features '{display_label}' compiled successfully");
    }

    println!("\n✅ All {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
