//! Service name resolution against the registry.

use courier::{Headers, Params, RegistryError, ServiceRegistry, canonicalize};

mod common;
use common::{FacebookHandler, SmsHandler, params, registry};

#[test]
fn test_casing_variants_resolve_to_same_handler() {
    let registry = registry();

    for variant in ["facebook", "Facebook", "FACEBOOK", "fAcEbOoK"] {
        let resolved = registry.resolve(variant).unwrap();
        assert_eq!(resolved.name(), "Facebook", "variant {variant}");
    }
}

#[test]
fn test_only_first_character_uppercased() {
    let registry = ServiceRegistry::builder()
        .register_type::<SmsHandler>("Twilio_sms")
        .build()
        .unwrap();

    assert!(registry.contains("TWILIO_SMS"));
    assert_eq!(canonicalize("twilio_SMS"), "Twilio_sms");
    assert!(!registry.contains("TwilioSms"));
}

#[test]
fn test_lookup_never_trims() {
    let registry = registry();
    let err = registry.resolve(" facebook").unwrap_err();
    assert_eq!(err.service(), " facebook");
}

#[test]
fn test_empty_service_not_recognized() {
    let err = registry().resolve("").unwrap_err();
    assert_eq!(err.service(), "");
    assert_eq!(err.to_string(), "The service '' was not recognized.");
}

#[test]
fn test_resolution_does_not_construct() {
    // Twilio construction needs `From`; resolving must still succeed.
    let registry = registry();
    let resolved = registry.resolve("twilio").unwrap();
    assert!(resolved.construct(&Params::new(), &Headers::new()).is_err());
    assert!(
        resolved
            .construct(&params(&[("From", "+15550100")]), &Headers::new())
            .is_ok()
    );
}

#[test]
fn test_registry_listing() {
    let registry = registry();
    assert_eq!(registry.services(), vec!["Facebook", "Twilio"]);
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
}

#[test]
fn test_registration_rules() {
    let err = ServiceRegistry::builder()
        .register_type::<FacebookHandler>("facebook")
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::NonCanonicalName { .. }));

    let err = ServiceRegistry::builder()
        .register_type::<FacebookHandler>("Facebook")
        .register_type::<SmsHandler>("Facebook")
        .build()
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateService("Facebook".into()));

    let registry = ServiceRegistry::builder()
        .register_type::<FacebookHandler>("Facebook")
        .register_type::<SmsHandler>("Facebook")
        .allow_overrides()
        .build()
        .unwrap();
    assert_eq!(registry.len(), 1);
}
