//! `scholar admin` — Manage the issuer registry.

use clap::{Args, Subcommand};
use scholar_core::Address;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Authorize an address to issue credentials.
    AddIssuer {
        /// Issuer wallet address.
        address: Address,
    },
    /// Revoke an issuer's authorization.
    RemoveIssuer {
        /// Issuer wallet address.
        address: Address,
    },
    /// List authorized issuers.
    Issuers {
        /// Admin address to inspect as (defaults to wallet.address).
        #[arg(long = "as")]
        admin: Option<Address>,
    },
}

pub async fn run(args: &AdminArgs, ctx: &Context) -> anyhow::Result<()> {
    match &args.command {
        AdminCommand::AddIssuer { address } => {
            let result = ctx.adapter.add_issuer(ctx.signer(), address).await;
            ctx.report(
                &result,
                &format!(
                    "Issuer added: {} is now authorized to issue credentials",
                    address.short()
                ),
                "adding issuer",
            )
        }
        AdminCommand::RemoveIssuer { address } => {
            let result = ctx.adapter.remove_issuer(ctx.signer(), address).await;
            ctx.report(
                &result,
                &format!("Issuer removed: {} can no longer issue credentials", address.short()),
                "removing issuer",
            )
        }
        AdminCommand::Issuers { admin } => {
            let admin = ctx.sender(*admin)?;
            let issuers = ctx.adapter.get_authorized_issuers(&admin).await;

            if ctx.json() {
                println!("{}", serde_json::to_string_pretty(&issuers)?);
                return Ok(());
            }

            println!("Authorized Issuers ({})", issuers.len());
            for issuer in &issuers {
                println!("  {}", issuer);
            }
            if issuers.is_empty() {
                println!("  No authorized issuers to show.");
                println!("  The registry's issuer list is not decoded yet; see debug logs for the raw result.");
            }
            Ok(())
        }
    }
}
