// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signzy: KYC verification connector
//
// Entry point. Initialises logging, loads configuration and the audit log,
// then runs one subcommand. Results go to stdout as JSON; logs go to stderr.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use signzy_client::VerificationRequest;
use signzy_core::error::{Result, SignzyError};
use signzy_core::fields::{all_customizations, entity_fields};

use cli::{AuditCommands, Cli, Commands};
use services::app_services::AppServices;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("signzy: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Field descriptors are static; no config or database needed.
    if let Commands::Fields { entity } = &cli.command {
        let fields = match entity {
            Some(entity) => entity_fields(*entity),
            None => all_customizations(),
        };
        print_json(&serde_json::to_value(fields)?)?;
        return Ok(ExitCode::SUCCESS);
    }

    let services = AppServices::init(cli.config.as_deref())?;
    tracing::debug!(audit = services.config().audit.enabled, "services ready");

    let request = match &cli.command {
        Commands::Audit { command } => return run_audit(&services, command),
        Commands::Execute { json } => read_request(json)?,
        other => match other.verification() {
            Some(request) => request,
            None => return Ok(ExitCode::SUCCESS),
        },
    };

    let outcome = services.verify(&request);
    print_json(&serde_json::to_value(&outcome)?)?;
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_audit(services: &AppServices, command: &AuditCommands) -> Result<ExitCode> {
    match command {
        AuditCommands::Recent { limit } => {
            let entries = services.recent_audit_entries(*limit)?;
            print_json(&serde_json::to_value(entries)?)?;
        }
        AuditCommands::Purge { days } => {
            let removed = services.purge_audit(*days)?;
            print_json(&serde_json::json!({ "removed": removed }))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse a tagged request from an argument, or from stdin when it is `-`.
fn read_request(arg: &str) -> Result<VerificationRequest> {
    let text = if arg == "-" {
        std::io::read_to_string(std::io::stdin())?
    } else {
        arg.to_owned()
    };
    serde_json::from_str(&text)
        .map_err(|e| SignzyError::InvalidInput(format!("request JSON is not valid: {e}")))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
