//! `scholar verify` — Verify a credential by its object id.

use clap::Args;
use scholar_core::{Address, CoreError, ObjectId};

use crate::context::Context;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Credential object id, or a share link ending in `/verify?id=<ID>`.
    #[arg(value_parser = parse_credential_ref)]
    pub credential_id: ObjectId,

    /// Verifier address to inspect as (defaults to wallet.address).
    #[arg(long = "as")]
    pub verifier: Option<Address>,
}

/// Accept either a bare object id or a share link carrying it in the `id`
/// query parameter.
pub fn parse_credential_ref(input: &str) -> Result<ObjectId, CoreError> {
    let input = input.trim();
    let Some((_, query)) = input.split_once('?') else {
        return input.parse();
    };
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("id="))
        .ok_or_else(|| CoreError::InvalidObjectId(input.to_string()))?
        .parse()
}

pub async fn run(args: &VerifyArgs, ctx: &Context) -> anyhow::Result<()> {
    let verifier = ctx.sender(args.verifier)?;
    let valid = ctx.adapter.verify_credential(&args.credential_id, &verifier).await;

    if ctx.json() {
        println!(
            "{}",
            serde_json::json!({
                "credential_id": args.credential_id.to_string(),
                "valid": valid,
            })
        );
    } else if valid {
        println!("Credential is VALID");
        println!("  ID:       {}", args.credential_id);
    } else {
        println!("Credential is INVALID");
        println!("  ID:       {}", args.credential_id);
        println!("  The credential was not found, has been revoked, or could not be checked.");
    }

    Ok(())
}
