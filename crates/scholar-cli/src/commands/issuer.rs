//! `scholar issuer` — Issue and revoke credentials.

use clap::{Args, Subcommand};
use scholar_core::{Address, ObjectId};

use crate::context::Context;

#[derive(Args, Debug)]
pub struct IssuerArgs {
    #[command(subcommand)]
    pub command: IssuerCommand,
}

#[derive(Subcommand, Debug)]
pub enum IssuerCommand {
    /// Issue a credential to a recipient.
    Issue {
        /// Recipient wallet address.
        #[arg(short, long)]
        recipient: Address,

        /// Course name, e.g. "Advanced Blockchain Development".
        #[arg(short, long)]
        course: String,

        /// Metadata URL (IPFS or HTTP).
        #[arg(short, long, default_value = "")]
        metadata_url: String,

        /// Issuance time in Unix milliseconds (defaults to now).
        #[arg(long)]
        issued_at: Option<u64>,
    },
    /// Revoke a previously issued credential.
    Revoke {
        /// Credential object id.
        credential_id: ObjectId,
    },
}

pub async fn run(args: &IssuerArgs, ctx: &Context) -> anyhow::Result<()> {
    match &args.command {
        IssuerCommand::Issue {
            recipient,
            course,
            metadata_url,
            issued_at,
        } => {
            if course.trim().is_empty() {
                anyhow::bail!("course name must not be empty");
            }
            let result = ctx
                .adapter
                .issue_credential(ctx.signer(), recipient, course, metadata_url, *issued_at)
                .await;
            ctx.report(
                &result,
                &format!(
                    "Credential issued: certificate for \"{}\" issued to {}",
                    course,
                    recipient.short()
                ),
                "issuing credential",
            )
        }
        IssuerCommand::Revoke { credential_id } => {
            let result = ctx.adapter.revoke_credential(ctx.signer(), credential_id).await;
            ctx.report(
                &result,
                &format!("Credential revoked: {}", credential_id),
                "revoking credential",
            )
        }
    }
}
