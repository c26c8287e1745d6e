//! End-to-end tests across claims, identifiers, DIDs and the registry.
//!
//! Each test starts from its own registry value. Nothing is shared, so the
//! tests run in any order.

use num_bigint::BigUint;

use idcore::claim::SubjectTag;
use idcore::crypto::sha256;
use idcore::registry::{blockchain, method, network};
use idcore::{
    Claim, ClaimBuilder, Did, DidCodec, DidError, DidMethodNetworkRequest, FieldElement,
    IdPosition, Identifier, MerklizedPosition, Registry, RegistryError, SchemaHash,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn schema() -> SchemaHash {
    SchemaHash::from_hex("ca938857241db9451ea329256b9c06e5").unwrap()
}

/// A polygon/amoy identity derived from a fixed state.
fn amoy_identity(registry: &Registry) -> Identifier {
    let id_type = registry
        .id_type(method::POLYGON_ID, blockchain::POLYGON, network::AMOY)
        .unwrap();
    let state = FieldElement::from_decimal(
        "7521024223205616003431860562270429547098131848980857190502964780628723574810",
    )
    .unwrap();
    Identifier::from_identity_state(id_type, &state).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn claim_subject_resolves_through_did() {
    let registry = Registry::with_defaults();
    let codec = DidCodec::new(&registry);
    let subject = amoy_identity(&registry);

    let did = codec.did_from_identifier(&subject).unwrap();
    assert_eq!(did.method, method::POLYGON_ID);
    assert_eq!(did.id_strings[0], blockchain::POLYGON);
    assert_eq!(did.id_strings[1], network::AMOY);

    // Print, re-parse, resolve.
    let reparsed: Did = did.to_string().parse().unwrap();
    let resolved = codec.identifier_from_did(&reparsed).unwrap();
    assert_eq!(resolved, subject);

    let claim = ClaimBuilder::new(schema())
        .id(resolved, IdPosition::Index)
        .revocation_nonce(3)
        .index_data_ints(Some(BigUint::from(1990u32)), None)
        .build()
        .unwrap();
    assert_eq!(claim.subject(), SubjectTag::OTHER_IDEN_INDEX);
    assert_eq!(claim.id().unwrap(), subject);
    assert_eq!(codec.did_from_identifier(&claim.id().unwrap()).unwrap(), did);
    assert_eq!(codec.chain_id_from_did(&did).unwrap(), 80_002);
}

#[test]
fn claim_survives_every_wire_format() {
    let registry = Registry::with_defaults();
    let subject = amoy_identity(&registry);

    let mut claim = Claim::new(schema());
    claim.set_value_id(&subject);
    claim.set_flag_updatable(true);
    claim.set_version(9);
    claim
        .set_merklized_root(&BigUint::from(12_345u32), MerklizedPosition::Index)
        .unwrap();

    let (h_index, h_value) = claim.hi_hv().unwrap();

    let from_binary = Claim::from_binary(&claim.to_binary()).unwrap();
    let from_strings = Claim::from_decimal_strings(&claim.to_decimal_strings()).unwrap();
    let from_json: Claim = serde_json::from_str(&serde_json::to_string(&claim).unwrap()).unwrap();

    for decoded in [from_binary, from_strings, from_json] {
        assert_eq!(decoded, claim);
        assert_eq!(decoded.value_id().unwrap(), subject);
        assert_eq!(decoded.merklized_root().unwrap(), BigUint::from(12_345u32));
        assert_eq!(decoded.hi_hv().unwrap(), (h_index, h_value));
    }
}

#[test]
fn genesis_identifier_vector() {
    let hash = sha256(b"genesistest");
    let mut genesis = [0u8; 27];
    genesis.copy_from_slice(&hash[..27]);

    let id = Identifier::new([0x00, 0x00], genesis).unwrap();
    assert_eq!(id.to_base58(), "114vgnnCupQMX4wqUBjg5kUya3zMXfPmKc9HNH4m2E");
    assert_eq!(Identifier::from_base58(&id.to_base58()).unwrap(), id);
    assert_eq!(Identifier::from_bytes(id.as_bytes()).unwrap(), id);
}

#[test]
fn registered_method_round_trips_and_stays_consistent() {
    let mut registry = Registry::with_defaults();
    let request = DidMethodNetworkRequest::new("test", "chain", "network", 0b0001_0001)
        .with_method_byte(0x03)
        .with_chain_id(77_777);

    registry.register_did_method_network(&request).unwrap();
    registry.register_did_method_network(&request).unwrap();

    let clash = DidMethodNetworkRequest::new("test", "chain2", "network2", 0b0001_0001);
    assert!(matches!(
        registry.register_did_method_network(&clash),
        Err(RegistryError::FlagAlreadyRegistered { .. })
    ));

    let codec = DidCodec::new(&registry);
    let id_type = registry.id_type("test", "chain", "network").unwrap();
    assert_eq!(id_type, [0x03, 0x11]);

    let did = codec
        .did_from_type_and_state(id_type, &FieldElement::from_u64(5))
        .unwrap();
    assert!(did.to_string().starts_with("did:test:chain:network:"));
    assert_eq!(codec.chain_id_from_did(&did).unwrap(), 77_777);

    let id = codec.identifier_from_did(&did).unwrap();
    assert!(id.is_genesis_state(&FieldElement::from_u64(5)));
}

#[test]
fn unregistered_did_gets_a_stable_fallback_identifier() {
    let registry = Registry::with_defaults();
    let codec = DidCodec::new(&registry);

    let did: Did = "did:example:123".parse().unwrap();
    let first = codec.identifier_from_did(&did).unwrap();
    let second = codec.identifier_from_did(&did).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_base58(), "4uQVuD6RkghrWQXkHLRThSG57NHBvLdArA4TufW6ryd");

    // The sentinel type never prints back as a DID.
    assert_eq!(
        codec.did_from_identifier(&first),
        Err(DidError::UnknownDidMethod)
    );

    // A claim can still carry it.
    let claim = ClaimBuilder::new(schema()).index_id(first).build().unwrap();
    assert_eq!(claim.index_id().unwrap(), first);
}

#[test]
fn tampered_did_is_rejected() {
    let registry = Registry::with_defaults();
    let codec = DidCodec::new(&registry);
    let subject = amoy_identity(&registry);

    let text = format!("did:polygonid:polygon:main:{}", subject.to_base58());
    let did: Did = text.parse().unwrap();
    assert!(matches!(
        codec.identifier_from_did(&did),
        Err(DidError::IncorrectDid(_))
    ));
}
