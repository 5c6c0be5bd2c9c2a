//! BCS encoding of call descriptors as programmable transaction kinds.
//!
//! Only what the credential module needs is modelled: a single `MoveCall`
//! command without type arguments, pure inputs (`address`, `vector<u8>`,
//! `u64`), and owned or shared object inputs. Variant order in the enums
//! below is part of the wire format.

use serde::Serialize;
use std::collections::HashMap;

use scholar_core::{CallArg, CallDescriptor, ObjectId};

use crate::error::LedgerError;

/// How an object input was found on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedObject {
    /// Address-owned or immutable object, referenced at an exact version.
    Owned {
        id: ObjectId,
        version: u64,
        digest: Vec<u8>,
    },
    /// Shared object, referenced by the version it became shared at.
    Shared {
        id: ObjectId,
        initial_shared_version: u64,
    },
}

#[derive(Serialize)]
enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Serialize)]
struct ProgrammableTransaction {
    inputs: Vec<InputArg>,
    commands: Vec<Command>,
}

#[derive(Serialize)]
enum InputArg {
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Serialize)]
enum ObjectArg {
    ImmOrOwnedObject(([u8; 32], u64, Vec<u8>)),
    SharedObject {
        id: [u8; 32],
        initial_shared_version: u64,
        mutable: bool,
    },
}

#[derive(Serialize)]
enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
}

// Entry points of the credential module are not generic.
#[derive(Serialize)]
enum TypeTag {}

#[derive(Serialize)]
struct ProgrammableMoveCall {
    package: [u8; 32],
    module: String,
    function: String,
    type_arguments: Vec<TypeTag>,
    arguments: Vec<Argument>,
}

#[derive(Serialize)]
enum Argument {
    #[allow(dead_code)]
    GasCoin,
    Input(u16),
}

/// BCS bytes of a pure (non-object) argument.
fn encode_pure(arg: &CallArg) -> Result<Vec<u8>, LedgerError> {
    let bytes = match arg {
        CallArg::Address(addr) => bcs::to_bytes(addr.as_bytes())?,
        CallArg::Bytes(bytes) => bcs::to_bytes(bytes)?,
        CallArg::U64(v) => bcs::to_bytes(v)?,
        CallArg::Object(id) => {
            return Err(LedgerError::ObjectResolution {
                id: *id,
                reason: "object argument has no pure encoding".into(),
            })
        }
    };
    Ok(bytes)
}

/// Encode `call` as a BCS `TransactionKind`, looking object inputs up in
/// `objects`. Shared objects are passed mutably unless the entry point is
/// read-only.
pub fn encode_transaction_kind(
    call: &CallDescriptor,
    objects: &HashMap<ObjectId, ResolvedObject>,
) -> Result<Vec<u8>, LedgerError> {
    let mutable = !call.entry_point().is_read_only();
    let mut inputs = Vec::with_capacity(call.arguments().len());

    for arg in call.arguments() {
        let input = match arg {
            CallArg::Object(id) => {
                let resolved = objects.get(id).ok_or_else(|| LedgerError::ObjectResolution {
                    id: *id,
                    reason: "object was not resolved before encoding".into(),
                })?;
                InputArg::Object(object_arg(resolved, mutable))
            }
            pure => InputArg::Pure(encode_pure(pure)?),
        };
        inputs.push(input);
    }

    let target = call.target();
    let arguments = (0..inputs.len())
        .map(|i| {
            u16::try_from(i)
                .map(Argument::Input)
                .map_err(|_| LedgerError::UnexpectedResponse("too many call arguments".into()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let kind = TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
        inputs,
        commands: vec![Command::MoveCall(Box::new(ProgrammableMoveCall {
            package: *target.package.as_bytes(),
            module: target.module.clone(),
            function: target.function.clone(),
            type_arguments: Vec::new(),
            arguments,
        }))],
    });

    Ok(bcs::to_bytes(&kind)?)
}

fn object_arg(resolved: &ResolvedObject, mutable: bool) -> ObjectArg {
    match resolved {
        ResolvedObject::Owned {
            id,
            version,
            digest,
        } => ObjectArg::ImmOrOwnedObject((*id.as_bytes(), *version, digest.clone())),
        ResolvedObject::Shared {
            id,
            initial_shared_version,
        } => ObjectArg::SharedObject {
            id: *id.as_bytes(),
            initial_shared_version: *initial_shared_version,
            mutable,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_core::{Address, EntryPoint};

    fn package() -> ObjectId {
        "0xc3beb6314754aa1a4bb148d70f5d613d7ab451e71d4baec7fe6914ff237fad73"
            .parse()
            .unwrap()
    }

    fn uleb_str(out: &mut Vec<u8>, s: &str) {
        assert!(s.len() < 128);
        out.push(s.len() as u8);
        out.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn test_pure_encodings() {
        let addr: Address = "0x2".parse().unwrap();
        let encoded = encode_pure(&CallArg::Address(addr)).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 2);

        assert_eq!(
            encode_pure(&CallArg::utf8("ab")).unwrap(),
            vec![2, b'a', b'b']
        );
        assert_eq!(
            encode_pure(&CallArg::U64(1_700_000_000_000)).unwrap(),
            1_700_000_000_000u64.to_le_bytes().to_vec()
        );
        assert!(encode_pure(&CallArg::Object(package())).is_err());
    }

    #[test]
    fn test_encode_owned_object_call() {
        let credential: ObjectId = "0x5eed".parse().unwrap();
        let call = CallDescriptor::new(
            package(),
            EntryPoint::RevokeCredential,
            vec![CallArg::Object(credential)],
        );
        let digest = vec![7u8; 32];
        let mut objects = HashMap::new();
        objects.insert(
            credential,
            ResolvedObject::Owned {
                id: credential,
                version: 9,
                digest: digest.clone(),
            },
        );

        let bytes = encode_transaction_kind(&call, &objects).unwrap();

        let mut expected = vec![0u8, 1, 1, 0];
        expected.extend_from_slice(credential.as_bytes());
        expected.extend_from_slice(&9u64.to_le_bytes());
        expected.push(32);
        expected.extend_from_slice(&digest);
        expected.extend_from_slice(&[1, 0]);
        expected.extend_from_slice(package().as_bytes());
        uleb_str(&mut expected, "academic_credentials");
        uleb_str(&mut expected, "revoke_credential");
        expected.extend_from_slice(&[0, 1, 1, 0, 0]);

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_encode_shared_registry_mutability() {
        let registry: ObjectId = "0xe9".parse().unwrap();
        let mut objects = HashMap::new();
        objects.insert(
            registry,
            ResolvedObject::Shared {
                id: registry,
                initial_shared_version: 3,
            },
        );

        let read = CallDescriptor::new(
            package(),
            EntryPoint::GetAuthorizedIssuers,
            vec![CallArg::Object(registry)],
        );
        let write = CallDescriptor::new(
            package(),
            EntryPoint::AddIssuer,
            vec![CallArg::Object(registry), CallArg::Address("0x1".parse().unwrap())],
        );

        let read_bytes = encode_transaction_kind(&read, &objects).unwrap();
        let write_bytes = encode_transaction_kind(&write, &objects).unwrap();

        // kind, input count, Object, SharedObject, id, version, mutable
        let flag_at = 4 + 32 + 8;
        assert_eq!(&read_bytes[..4], &[0, 1, 1, 1]);
        assert_eq!(read_bytes[flag_at], 0);
        assert_eq!(&write_bytes[..4], &[0, 2, 1, 1]);
        assert_eq!(write_bytes[flag_at], 1);
        // Second input is a pure 32-byte address.
        assert_eq!(write_bytes[flag_at + 1], 0);
        assert_eq!(write_bytes[flag_at + 2], 32);
    }

    #[test]
    fn test_unresolved_object_is_an_error() {
        let call = CallDescriptor::new(
            package(),
            EntryPoint::VerifyCredential,
            vec![CallArg::Object("0x77".parse().unwrap())],
        );
        let err = encode_transaction_kind(&call, &HashMap::new()).unwrap_err();
        assert!(matches!(err, LedgerError::ObjectResolution { .. }));
    }
}
