//! `scholar student` — Check and share credentials you hold.

use clap::{Args, Subcommand};
use scholar_core::{Address, ObjectId};

use crate::context::Context;

#[derive(Args, Debug)]
pub struct StudentArgs {
    #[command(subcommand)]
    pub command: StudentCommand,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// Show whether a credential you hold is still active.
    Status {
        /// Credential object id or share link.
        #[arg(value_parser = crate::commands::verify::parse_credential_ref)]
        credential_id: ObjectId,

        /// Your address (defaults to wallet.address).
        #[arg(long = "as")]
        holder: Option<Address>,
    },
    /// Print a verification link for a credential.
    Share {
        /// Credential object id.
        credential_id: ObjectId,

        /// Base URL of the verification page.
        #[arg(long, default_value = "http://localhost:8080")]
        base_url: String,
    },
}

/// Link a verifier can open to check `credential_id`.
pub fn share_url(base_url: &str, credential_id: &ObjectId) -> String {
    format!("{}/verify?id={}", base_url.trim_end_matches('/'), credential_id)
}

pub async fn run(args: &StudentArgs, ctx: &Context) -> anyhow::Result<()> {
    match &args.command {
        StudentCommand::Status {
            credential_id,
            holder,
        } => {
            let holder = ctx.sender(*holder)?;
            let active = ctx.adapter.verify_credential(credential_id, &holder).await;
            let status = if active { "active" } else { "revoked or unknown" };

            if ctx.json() {
                println!(
                    "{}",
                    serde_json::json!({
                        "credential_id": credential_id.to_string(),
                        "holder": holder.to_string(),
                        "active": active,
                    })
                );
            } else {
                println!("Credential {}", credential_id);
                println!("  Holder:   {}", holder);
                println!("  Status:   {}", status);
            }
            Ok(())
        }
        StudentCommand::Share {
            credential_id,
            base_url,
        } => {
            println!("{}", share_url(base_url, credential_id));
            Ok(())
        }
    }
}
