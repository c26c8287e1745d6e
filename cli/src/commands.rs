//! Command handlers.
//!
//! Each handler takes parsed arguments and a registry and returns the JSON
//! document `main` prints. Nothing here writes to stdout.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use serde::Serialize;

use idcore::{
    Claim, ClaimBuilder, Did, DidCodec, FieldElement, IdPosition, Identifier, MerklizedPosition,
    Registry, SchemaHash,
};

use crate::cli::{BuildArgs, FromStateArgs, Side};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Registry names behind an identifier's type bytes.
#[derive(Debug, Serialize)]
pub struct TypeParts {
    pub method: String,
    pub blockchain: String,
    pub network: String,
    pub unsupported: bool,
}

/// `id inspect` output.
#[derive(Debug, Serialize)]
pub struct IdReport {
    pub id: String,
    pub int: String,
    #[serde(rename = "type")]
    pub id_type: String,
    pub genesis: String,
    pub checksum: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub parts: Option<TypeParts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,
}

/// `id from-state` output.
#[derive(Debug, Serialize)]
pub struct FromStateReport {
    pub id: String,
    #[serde(rename = "type")]
    pub id_type: String,
    pub did: String,
}

/// `did parse` output: the parsed DID plus its derived views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DidReport {
    #[serde(flatten)]
    pub did: Did,
    pub id: String,
    pub path: String,
    pub is_url: bool,
}

/// `did resolve` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub did: String,
    pub id: String,
    #[serde(rename = "type")]
    pub id_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimHashes {
    pub h_index: String,
    pub h_value: String,
}

/// `claim build` output.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub slots: Vec<String>,
    pub binary: String,
    pub hashes: ClaimHashes,
}

/// `claim inspect` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub schema_hash: String,
    pub subject_position: String,
    pub subject: Option<String>,
    pub updatable: bool,
    pub version: u32,
    pub revocation_nonce: u64,
    pub expiration: Option<String>,
    pub merklized_position: String,
    pub merklized_root: Option<String>,
    pub hashes: ClaimHashes,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_int(name: &str, s: &str) -> Result<BigUint> {
    s.parse::<BigUint>()
        .with_context(|| format!("{name} is not a decimal integer: {s:?}"))
}

fn data_pair(
    side: &str,
    a: &Option<String>,
    b: &Option<String>,
) -> Result<(Option<BigUint>, Option<BigUint>)> {
    let a = a.as_deref().map(|s| parse_int(&format!("{side}-a"), s)).transpose()?;
    let b = b.as_deref().map(|s| parse_int(&format!("{side}-b"), s)).transpose()?;
    Ok((a, b))
}

fn hashes(claim: &Claim) -> Result<ClaimHashes> {
    let (h_index, h_value) = claim.hi_hv()?;
    Ok(ClaimHashes {
        h_index: h_index.to_string(),
        h_value: h_value.to_string(),
    })
}

// ---------------------------------------------------------------------------
// id
// ---------------------------------------------------------------------------

pub fn id_inspect(registry: &Registry, text: &str) -> Result<IdReport> {
    let id = Identifier::from_base58(text).context("invalid identifier")?;
    let codec = DidCodec::new(registry);

    let parts = match codec.decode_id_parts(&id) {
        Ok(parts) => Some(TypeParts {
            method: parts.method.to_string(),
            blockchain: parts.blockchain.to_string(),
            network: parts.network.to_string(),
            unsupported: parts.is_unsupported(),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "identifier type not in registry");
            None
        }
    };

    Ok(IdReport {
        id: id.to_base58(),
        int: id.to_int().to_string(),
        id_type: hex::encode(id.id_type()),
        genesis: hex::encode(id.genesis()),
        checksum: hex::encode(id.checksum()),
        parts,
        did: codec.did_from_identifier(&id).ok().map(|did| did.to_string()),
    })
}

pub fn id_from_state(registry: &Registry, args: &FromStateArgs) -> Result<FromStateReport> {
    let id_type = registry.id_type(&args.method, &args.blockchain, &args.network)?;
    let state = FieldElement::from_decimal(&args.state).context("invalid identity state")?;
    let id = Identifier::from_identity_state(id_type, &state)?;
    let did = DidCodec::new(registry).did_from_identifier(&id)?;

    Ok(FromStateReport {
        id: id.to_base58(),
        id_type: hex::encode(id_type),
        did: did.to_string(),
    })
}

// ---------------------------------------------------------------------------
// did
// ---------------------------------------------------------------------------

pub fn did_parse(text: &str) -> Result<DidReport> {
    let did = Did::parse(text)?;
    Ok(DidReport {
        id: did.id(),
        path: did.path(),
        is_url: did.is_url(),
        did,
    })
}

pub fn did_resolve(registry: &Registry, text: &str) -> Result<ResolveReport> {
    let did = Did::parse(text)?;
    let codec = DidCodec::new(registry);
    let id = codec.identifier_from_did(&did)?;

    let chain_id = match codec.chain_id_from_did(&did) {
        Ok(chain_id) => Some(chain_id),
        Err(e) => {
            tracing::debug!(error = %e, "no chain id for DID");
            None
        }
    };
    Ok(ResolveReport {
        did: did.to_string(),
        id: id.to_base58(),
        id_type: hex::encode(id.id_type()),
        chain_id,
    })
}

// ---------------------------------------------------------------------------
// claim
// ---------------------------------------------------------------------------

pub fn claim_build(args: &BuildArgs) -> Result<BuildReport> {
    let schema = SchemaHash::from_hex(&args.schema).context("invalid schema hash")?;
    let mut builder = ClaimBuilder::new(schema).updatable(args.updatable);

    if let Some(version) = args.claim_version {
        builder = builder.version(version);
    }
    if let Some(nonce) = args.revocation_nonce {
        builder = builder.revocation_nonce(nonce);
    }
    if let Some(text) = &args.expiration {
        let date = DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("invalid expiration: {text:?}"))?
            .with_timezone(&Utc);
        builder = builder.expiration_date(date);
    }
    if let Some(text) = &args.id {
        let id = Identifier::from_base58(text).context("invalid subject identifier")?;
        let position = match args.id_position {
            Some(Side::Index) => IdPosition::Index,
            Some(Side::Value) => IdPosition::Value,
            None => return Err(anyhow!("--id needs --id-position")),
        };
        builder = builder.id(id, position);
    }

    if args.index_a.is_some() || args.index_b.is_some() {
        let (a, b) = data_pair("index", &args.index_a, &args.index_b)?;
        builder = builder.index_data_ints(a, b);
    }
    if args.value_a.is_some() || args.value_b.is_some() {
        let (a, b) = data_pair("value", &args.value_a, &args.value_b)?;
        builder = builder.value_data_ints(a, b);
    }

    if let Some(text) = &args.merklized_root {
        let root = parse_int("merklized-root", text)?;
        let position = match args.merklized_position {
            Some(Side::Index) => MerklizedPosition::Index,
            Some(Side::Value) => MerklizedPosition::Value,
            None => return Err(anyhow!("--merklized-root needs --merklized-position")),
        };
        builder = builder.merklized_root(root, position);
    }

    let claim = builder.build()?;
    Ok(BuildReport {
        slots: claim.to_decimal_strings(),
        binary: hex::encode(claim.to_binary()),
        hashes: hashes(&claim)?,
    })
}

pub fn claim_inspect(json_text: &str) -> Result<InspectReport> {
    let claim = Claim::from_json(json_text)?;
    let id_position = claim.id_position()?;
    let merklized_position = claim.merklized_position()?;

    let subject = match id_position {
        IdPosition::None => None,
        IdPosition::Index | IdPosition::Value => Some(claim.id()?.to_base58()),
    };
    let merklized_root = match merklized_position {
        MerklizedPosition::None => None,
        MerklizedPosition::Index | MerklizedPosition::Value => {
            Some(claim.merklized_root()?.to_string())
        }
    };

    Ok(InspectReport {
        schema_hash: claim.schema_hash().to_hex(),
        subject_position: format!("{id_position:?}").to_lowercase(),
        subject,
        updatable: claim.flag_updatable(),
        version: claim.version(),
        revocation_nonce: claim.revocation_nonce(),
        expiration: claim.expiration_date()?.map(|d| d.to_rfc3339()),
        merklized_position: format!("{merklized_position:?}").to_lowercase(),
        merklized_root,
        hashes: hashes(&claim)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MUMBAI_ID: &str = "wyFiV4w71QgWPn6bYLsZoysFay66gKtVa9kfu6yMZ";

    fn build_args() -> BuildArgs {
        BuildArgs {
            schema: "ca938857241db9451ea329256b9c06e5".into(),
            updatable: false,
            claim_version: None,
            revocation_nonce: None,
            expiration: None,
            id: None,
            id_position: None,
            index_a: None,
            index_b: None,
            value_a: None,
            value_b: None,
            merklized_root: None,
            merklized_position: None,
        }
    }

    #[test]
    fn inspect_registered_identifier() {
        let registry = Registry::with_defaults();
        let report = id_inspect(&registry, MUMBAI_ID).unwrap();
        assert_eq!(report.id_type, "0112");
        assert_eq!(report.parts.as_ref().unwrap().network, "mumbai");
        assert_eq!(
            report.did.as_deref(),
            Some(format!("did:iden3:polygon:mumbai:{MUMBAI_ID}").as_str())
        );

        // Parts are flattened into the top-level object.
        let out = serde_json::to_value(&report).unwrap();
        assert_eq!(out["type"], "0112");
        assert_eq!(out["method"], "iden3");
        assert_eq!(out["unsupported"], false);
    }

    #[test]
    fn from_state_without_chain() {
        let registry = Registry::with_defaults();
        let args = FromStateArgs {
            method: "iden3".into(),
            blockchain: String::new(),
            network: String::new(),
            state: "1".into(),
        };
        let report = id_from_state(&registry, &args).unwrap();
        assert_eq!(report.did, "did:iden3:tJ93RwaVfE1PEMxd5rpZZuPtLCwbEaDCrNBhAy8HM");
    }

    #[test]
    fn parse_reports_components() {
        let report = did_parse("did:example:123;service=agent/a/b?q#f").unwrap();
        assert_eq!(report.path, "a/b");
        assert!(report.is_url);

        let out = serde_json::to_value(&report).unwrap();
        assert_eq!(out["method"], "example");
        assert_eq!(out["isUrl"], true);
        assert_eq!(out["params"][0]["value"], "agent");
    }

    #[test]
    fn resolve_reports_chain_id() {
        let registry = Registry::with_defaults();
        let report = did_resolve(
            &registry,
            &format!("did:iden3:polygon:mumbai:{MUMBAI_ID}"),
        )
        .unwrap();
        assert_eq!(report.chain_id, Some(80_001));

        let report = did_resolve(&registry, "did:example:123").unwrap();
        assert_eq!(report.id_type, "ffff");
        let out = serde_json::to_value(&report).unwrap();
        assert!(out.get("chainId").is_none());
    }

    #[test]
    fn build_then_inspect() {
        let mut args = build_args();
        args.updatable = true;
        args.claim_version = Some(3);
        args.revocation_nonce = Some(99);
        args.expiration = Some("2030-01-01T00:00:00Z".into());
        args.id = Some(MUMBAI_ID.into());
        args.id_position = Some(Side::Value);
        args.index_a = Some("42".into());

        let built = claim_build(&args).unwrap();
        let slots = serde_json::to_string(&built.slots).unwrap();
        let inspected = claim_inspect(&slots).unwrap();

        assert_eq!(inspected.schema_hash, "ca938857241db9451ea329256b9c06e5");
        assert_eq!(inspected.subject_position, "value");
        assert_eq!(inspected.subject.as_deref(), Some(MUMBAI_ID));
        assert!(inspected.updatable);
        assert_eq!(inspected.version, 3);
        assert_eq!(inspected.revocation_nonce, 99);
        assert_eq!(
            inspected.expiration.as_deref(),
            Some("2030-01-01T00:00:00+00:00")
        );
        assert_eq!(inspected.merklized_position, "none");
        assert_eq!(inspected.merklized_root, None);
        assert_eq!(inspected.hashes, built.hashes);

        let out = serde_json::to_value(&inspected).unwrap();
        assert!(out["merklizedRoot"].is_null());
        assert!(out["hashes"]["hIndex"].is_string());
    }

    #[test]
    fn build_rejects_out_of_field_data() {
        let mut args = build_args();
        args.value_b = Some(
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
                .into(),
        );
        assert!(claim_build(&args).is_err());
    }
}
