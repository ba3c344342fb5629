//! Development automation tasks for the `Meetgrid` workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{anyhow, Context};

mod features;

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("deny") => run_deny(),
        Some("audit") => run_audit(),
        Some("codegen") => run_codegen(),
        Some("test-features") => features::test_feature_matrix(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Meetgrid Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci        Run all CI checks (fmt, clippy, feature matrix, test, deny, audit)");
    println!("    fmt       Check Rust code formatting");
    println!("    clippy    Run Clippy lints");
    println!("    test      Run all tests");
    println!("    codegen   Generate TypeScript bindings for the wire types");
    println!("    test-features  Verify meetgrid-infra feature matrix compiles");
    println!("    deny      Check dependencies with cargo-deny");
    println!("    audit     Audit dependencies for security vulnerabilities");
    println!("    help      Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/6: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/6: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/6: Checking meetgrid-infra feature matrix...");
    features::test_feature_matrix()?;

    println!("\n==> Step 4/6: Running tests...");
    run_test()?;

    println!("\n==> Step 5/6: Checking dependencies...");
    run_deny()?;

    println!("\n==> Step 6/6: Auditing dependencies...");
    run_audit()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["fmt", "--all", "--", "--check"]).status()?;

    if !status.success() {
        anyhow::bail!("Format check failed. Run 'cargo fmt --all' to fix.");
    }

    Ok(())
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"])
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("Clippy run failed. See output above."))
    }
}

/// Run all workspace tests
fn run_test() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["test", "--workspace", "--all-features"]).status()?;

    if !status.success() {
        anyhow::bail!("Tests failed");
    }

    Ok(())
}

/// Check dependencies with cargo-deny
fn run_deny() -> anyhow::Result<()> {
    // Check if cargo-deny is installed
    let check_installed = Command::new("cargo").args(["deny", "--version"]).output();

    if check_installed.is_err() || !check_installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-deny is not installed.");
        eprintln!("Install it with: cargo install cargo-deny");
        anyhow::bail!("cargo-deny not found");
    }

    let status = Command::new("cargo").args(["deny", "check"]).status()?;

    if !status.success() {
        anyhow::bail!("cargo-deny found issues");
    }

    Ok(())
}

/// Audit dependencies for security vulnerabilities
fn run_audit() -> anyhow::Result<()> {
    // Check if cargo-audit is installed
    let check_installed = Command::new("cargo").args(["audit", "--version"]).output();

    if check_installed.is_err() || !check_installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-audit is not installed.");
        eprintln!("Install it with: cargo install cargo-audit");
        anyhow::bail!("cargo-audit not found");
    }

    let status = Command::new("cargo").args(["audit"]).status()?;

    if !status.success() {
        anyhow::bail!("cargo-audit found vulnerabilities");
    }

    Ok(())
}

/// Generate TypeScript bindings for the domain wire types
fn run_codegen() -> anyhow::Result<()> {
    println!("==> Generating TypeScript types from Rust...\n");

    // ts-rs writes one file per exported type while running the domain tests
    println!("Step 1/2: Running ts-gen tests to generate TypeScript files...");
    let status = Command::new("cargo")
        .args(["test", "-p", "meetgrid-domain", "--features", "ts-gen", "--lib"])
        .status()
        .context("Failed to run cargo test")?;

    if !status.success() {
        anyhow::bail!("TypeScript generation tests failed");
    }

    let bindings_dir = PathBuf::from("crates/domain/bindings");
    if !bindings_dir.exists() {
        anyhow::bail!(
            "Bindings directory not found at {}. TypeScript generation may have failed.",
            bindings_dir.display()
        );
    }
    println!("  Found {} TypeScript files", count_ts_files(&bindings_dir)?);

    let target = env::var_os("MEETGRID_BINDINGS_DIR").map_or_else(|| bindings_dir.clone(), PathBuf::from);
    println!("\nStep 2/2: Writing index.ts to {}...", target.display());
    if target != bindings_dir {
        sync_bindings(&bindings_dir, &target)?;
    }
    generate_index_ts(&target)?;

    println!("\n✓ TypeScript type generation complete!");
    println!("  Generated files: {}", target.display());

    Ok(())
}

/// Count TypeScript files in a directory
fn count_ts_files(dir: &Path) -> anyhow::Result<usize> {
    let entries = fs::read_dir(dir).context("Failed to read bindings directory")?;

    Ok(entries
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(std::ffi::OsStr::to_str) == Some("ts"))
        .count())
}

/// Copy TypeScript bindings to another directory
fn sync_bindings(src: &Path, dest: &Path) -> anyhow::Result<()> {
    // Create destination directory if it doesn't exist
    fs::create_dir_all(dest).context("Failed to create bindings target directory")?;

    // Read all .ts files from source
    let entries = fs::read_dir(src).context("Failed to read bindings directory")?;

    let mut synced = 0;
    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path.extension().and_then(std::ffi::OsStr::to_str) == Some("ts") {
            let file_name = path.file_name().ok_or_else(|| anyhow!("Invalid file name"))?;
            let dest_path = dest.join(file_name);

            fs::copy(&path, &dest_path).with_context(|| {
                format!("Failed to copy {} to {}", path.display(), dest_path.display())
            })?;

            synced += 1;
        }
    }

    println!("  Synced {synced} files");
    Ok(())
}

/// Generate index.ts that exports all types
fn generate_index_ts(types_dir: &Path) -> anyhow::Result<()> {
    let index_path = types_dir.join("index.ts");

    // Read all .ts files (excluding index.ts itself)
    let entries = fs::read_dir(types_dir).context("Failed to read types directory")?;

    let mut type_files: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|e| {
            let path = e.path();
            let file_name = path.file_name()?.to_str()?;

            // Skip index.ts, .gitkeep, and test files
            if file_name == "index.ts" || file_name == ".gitkeep" || file_name.ends_with(".test.ts")
            {
                return None;
            }

            // Only include .ts files
            if path.extension()?.to_str()? == "ts" {
                // Remove .ts extension to get the module name
                Some(file_name[..file_name.len() - 3].to_string())
            } else {
                None
            }
        })
        .collect();

    // Sort alphabetically for consistent output
    type_files.sort();

    // Generate index.ts content
    let mut content = String::from(
        "// Auto-generated types from Rust backend\n\
         // Generated by ts-rs via: cargo xtask codegen\n\
         // DO NOT EDIT MANUALLY - changes will be overwritten\n\n",
    );

    for type_name in &type_files {
        let _ = writeln!(content, "export type {{ {type_name} }} from './{type_name}';");
    }

    fs::write(&index_path, content)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    println!("  Generated index.ts with {} exports", type_files.len());

    Ok(())
}
